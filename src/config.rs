use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    /// When unset the in-memory store is used.
    pub mongo_uri: Option<String>,
    pub database_name: String,
    pub app_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            mongo_uri: None,
            database_name: "supertodo".to_string(),
            app_title: "SuperTODO".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            mongo_uri: env::var("MONGO_URI").ok().filter(|uri| !uri.trim().is_empty()),
            database_name: env::var("DATABASE_NAME").unwrap_or(defaults.database_name),
            app_title: env::var("APP_TITLE").unwrap_or(defaults.app_title),
        }
    }
}
