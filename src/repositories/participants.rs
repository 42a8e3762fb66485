use crate::common::context::Context;
use crate::entities::conversations::ConversationParticipant;

const TABLE_NAME: &str = "conversation_participants";
const READ_FIELDS: &str = "conversation_id, user_id, is_active, joined_at, last_read_at";

pub async fn fetch_active<C: Context>(
    ctx: &C,
    conversation_id: i64,
) -> sqlx::Result<Vec<ConversationParticipant>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE conversation_id = ? AND is_active ORDER BY joined_at, user_id"
    );
    sqlx::query_as(QUERY)
        .bind(conversation_id)
        .fetch_all(ctx.db())
        .await
}

pub async fn is_active_participant<C: Context>(
    ctx: &C,
    conversation_id: i64,
    user_id: i64,
) -> sqlx::Result<bool> {
    const QUERY: &str = const_str::concat!(
        "SELECT EXISTS(SELECT 1 FROM ",
        TABLE_NAME,
        " WHERE conversation_id = ? AND user_id = ? AND is_active)"
    );
    sqlx::query_scalar(QUERY)
        .bind(conversation_id)
        .bind(user_id)
        .fetch_one(ctx.db())
        .await
}

/// Inserts a membership row, reactivating a previously soft-removed one.
pub async fn add<C: Context>(ctx: &C, conversation_id: i64, user_id: i64) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (conversation_id, user_id) VALUES (?, ?) ",
        "ON CONFLICT (conversation_id, user_id) DO UPDATE SET is_active = TRUE"
    );
    sqlx::query(QUERY)
        .bind(conversation_id)
        .bind(user_id)
        .execute(ctx.db())
        .await?;
    Ok(())
}

/// Advisory display state only; unread computation always goes through the
/// receipt set.
pub async fn set_last_read<C: Context>(
    ctx: &C,
    conversation_id: i64,
    user_id: i64,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET last_read_at = strftime('%Y-%m-%d %H:%M:%f', 'now') ",
        "WHERE conversation_id = ? AND user_id = ? AND is_active"
    );
    sqlx::query(QUERY)
        .bind(conversation_id)
        .bind(user_id)
        .execute(ctx.db())
        .await?;
    Ok(())
}
