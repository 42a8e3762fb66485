use crate::adapters::push_service::PushTransport;
use crate::common::context::Context;
use sqlx::{Pool, Sqlite};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub push: Arc<dyn PushTransport>,
}

impl Context for AppState {
    fn db(&self) -> &Pool<Sqlite> {
        &self.db
    }

    fn push(&self) -> &Arc<dyn PushTransport> {
        &self.push
    }
}
