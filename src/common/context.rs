use crate::adapters::push_service::PushTransport;
use sqlx::{Pool, Sqlite};
use std::sync::Arc;

pub trait Context: Sync + Send {
    fn db(&self) -> &Pool<Sqlite>;
    fn push(&self) -> &Arc<dyn PushTransport>;
}
