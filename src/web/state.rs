use std::sync::Arc;

use crate::{Config, model::LmsStore};

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn LmsStore>,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn LmsStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &dyn LmsStore {
        self.store.as_ref()
    }

    pub fn shared_store(&self) -> Arc<dyn LmsStore> {
        self.store.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
