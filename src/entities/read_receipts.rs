use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Presence of a row means "this user has seen this message"; receipts are
/// inserted once and never updated or deleted.
#[derive(Debug, FromRow)]
pub struct MessageReadReceipt {
    pub message_id: i64,
    pub user_id: i64,
    pub read_at: DateTime<Utc>,
}
