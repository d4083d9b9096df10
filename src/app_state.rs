use std::sync::Arc;

use tera::Tera;

use crate::config::Config;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub templates: Arc<Tera>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, store: Store) -> Result<Self, tera::Error> {
        Ok(Self {
            store: Arc::new(store),
            templates: Arc::new(crate::templates::engine()?),
            config,
        })
    }
}
