// src/main.rs

use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::info;

use supertodo::app_state::AppState;
use supertodo::config::Config;
use supertodo::store::Store;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let store = Store::connect(&config)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    match store {
        Store::Mongo(_) => info!("Using MongoDB store ({})", config.database_name),
        Store::Memory(_) => info!("MONGO_URI not set, using in-memory store"),
    }
    let state = AppState::new(config.clone(), store)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    info!("Server running at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(supertodo::routes)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
