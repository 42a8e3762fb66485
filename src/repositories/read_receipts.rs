use crate::common::context::Context;

const TABLE_NAME: &str = "message_read_receipts";

/// Unread is always recomputed from the message and receipt sets; there is no
/// cached counter anywhere that could drift.
pub async fn unread_count<C: Context>(
    ctx: &C,
    conversation_id: i64,
    user_id: i64,
) -> sqlx::Result<i64> {
    const QUERY: &str = const_str::concat!(
        "SELECT COUNT(*) FROM messages m ",
        "WHERE m.conversation_id = ? AND m.sender_id <> ? ",
        "AND NOT EXISTS (SELECT 1 FROM ",
        TABLE_NAME,
        " r WHERE r.message_id = m.id AND r.user_id = ?)"
    );
    sqlx::query_scalar(QUERY)
        .bind(conversation_id)
        .bind(user_id)
        .bind(user_id)
        .fetch_one(ctx.db())
        .await
}

pub async fn has_unread<C: Context>(
    ctx: &C,
    conversation_id: i64,
    user_id: i64,
) -> sqlx::Result<bool> {
    const QUERY: &str = const_str::concat!(
        "SELECT EXISTS(SELECT 1 FROM messages m ",
        "WHERE m.conversation_id = ? AND m.sender_id <> ? ",
        "AND NOT EXISTS (SELECT 1 FROM ",
        TABLE_NAME,
        " r WHERE r.message_id = m.id AND r.user_id = ?))"
    );
    sqlx::query_scalar(QUERY)
        .bind(conversation_id)
        .bind(user_id)
        .bind(user_id)
        .fetch_one(ctx.db())
        .await
}

/// Inserts one receipt per currently-unread message in a single statement.
/// Re-running is a no-op for messages already covered, which makes the whole
/// operation idempotent under duplicate or concurrent calls.
pub async fn mark_conversation_read<C: Context>(
    ctx: &C,
    conversation_id: i64,
    user_id: i64,
) -> sqlx::Result<u64> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (message_id, user_id) ",
        "SELECT m.id, ? FROM messages m ",
        "WHERE m.conversation_id = ? AND m.sender_id <> ? ",
        "AND NOT EXISTS (SELECT 1 FROM ",
        TABLE_NAME,
        " r WHERE r.message_id = m.id AND r.user_id = ?) ",
        "ON CONFLICT (message_id, user_id) DO NOTHING"
    );
    let result = sqlx::query(QUERY)
        .bind(user_id)
        .bind(conversation_id)
        .bind(user_id)
        .bind(user_id)
        .execute(ctx.db())
        .await?;
    Ok(result.rows_affected())
}
