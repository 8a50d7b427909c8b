//! Application state

use kith_core::{SurrealStore, UserService};

use crate::{config::ServerConfig, error::ServerResult};

#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub store: SurrealStore,
    pub users: UserService<SurrealStore>,
}

impl AppState {
    pub async fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = SurrealStore::connect(&config.store).await?;
        let users = UserService::new(store.clone());

        Ok(Self {
            config,
            store,
            users,
        })
    }
}
