use crate::common::context::Context;
use crate::entities::messages::{Message, MessageType};

const TABLE_NAME: &str = "messages";
const READ_FIELDS: &str =
    "id, conversation_id, sender_id, content, message_type, is_important, created_at";

pub async fn fetch_one<C: Context>(ctx: &C, message_id: i64) -> sqlx::Result<Message> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(message_id)
        .fetch_one(ctx.db())
        .await
}

pub async fn create<C: Context>(
    ctx: &C,
    conversation_id: i64,
    sender_id: i64,
    content: &str,
    message_type: MessageType,
    is_important: bool,
) -> sqlx::Result<Message> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (conversation_id, sender_id, content, message_type, is_important) ",
        "VALUES (?, ?, ?, ?, ?)"
    );
    let result = sqlx::query(QUERY)
        .bind(conversation_id)
        .bind(sender_id)
        .bind(content)
        .bind(message_type.as_str())
        .bind(is_important)
        .execute(ctx.db())
        .await?;
    fetch_one(ctx, result.last_insert_rowid()).await
}

/// One page of history, newest first; the id breaks created_at ties so
/// ordering stays total under burst sends.
pub async fn fetch_page<C: Context>(
    ctx: &C,
    conversation_id: i64,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<Message>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE conversation_id = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
    );
    sqlx::query_as(QUERY)
        .bind(conversation_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(ctx.db())
        .await
}

pub async fn fetch_latest<C: Context>(
    ctx: &C,
    conversation_id: i64,
) -> sqlx::Result<Option<Message>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE conversation_id = ? ORDER BY created_at DESC, id DESC LIMIT 1"
    );
    sqlx::query_as(QUERY)
        .bind(conversation_id)
        .fetch_optional(ctx.db())
        .await
}
