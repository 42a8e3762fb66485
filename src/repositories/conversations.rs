use crate::common::context::Context;
use crate::entities::conversations::{Conversation, ConversationType};

const TABLE_NAME: &str = "conversations";
const READ_FIELDS: &str =
    "id, conversation_type, name, avatar_url, created_by, created_at, updated_at";

pub async fn fetch_optional<C: Context>(
    ctx: &C,
    conversation_id: i64,
) -> sqlx::Result<Option<Conversation>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(conversation_id)
        .fetch_optional(ctx.db())
        .await
}

/// Oldest `direct` conversation where both users are active participants.
/// Picking the oldest keeps racing duplicate creations converging on a single
/// conversation afterwards.
pub async fn find_direct_between<C: Context>(
    ctx: &C,
    user_id: i64,
    peer_id: i64,
) -> sqlx::Result<Option<Conversation>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        "cv.id, cv.conversation_type, cv.name, cv.avatar_url, cv.created_by, ",
        "cv.created_at, cv.updated_at ",
        "FROM ",
        TABLE_NAME,
        " cv ",
        "INNER JOIN conversation_participants p1 ",
        "ON p1.conversation_id = cv.id AND p1.user_id = ? AND p1.is_active ",
        "INNER JOIN conversation_participants p2 ",
        "ON p2.conversation_id = cv.id AND p2.user_id = ? AND p2.is_active ",
        "WHERE cv.conversation_type = ? ORDER BY cv.id LIMIT 1"
    );
    sqlx::query_as(QUERY)
        .bind(user_id)
        .bind(peer_id)
        .bind(ConversationType::Direct.as_str())
        .fetch_optional(ctx.db())
        .await
}

pub async fn fetch_for_user<C: Context>(ctx: &C, user_id: i64) -> sqlx::Result<Vec<Conversation>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        "cv.id, cv.conversation_type, cv.name, cv.avatar_url, cv.created_by, ",
        "cv.created_at, cv.updated_at ",
        "FROM ",
        TABLE_NAME,
        " cv ",
        "INNER JOIN conversation_participants p ",
        "ON p.conversation_id = cv.id AND p.user_id = ? AND p.is_active ",
        "ORDER BY cv.updated_at DESC, cv.id DESC"
    );
    sqlx::query_as(QUERY)
        .bind(user_id)
        .fetch_all(ctx.db())
        .await
}

/// Creates the conversation together with its participant rows in one
/// transaction, so a failed participant insert leaves nothing behind.
pub async fn create<C: Context>(
    ctx: &C,
    conversation_type: ConversationType,
    name: &str,
    avatar_url: Option<&str>,
    created_by: i64,
    participant_ids: &[i64],
) -> sqlx::Result<i64> {
    const INSERT_CONVERSATION: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (conversation_type, name, avatar_url, created_by) VALUES (?, ?, ?, ?)"
    );
    const INSERT_PARTICIPANT: &str =
        "INSERT INTO conversation_participants (conversation_id, user_id) VALUES (?, ?)";

    let mut tx = ctx.db().begin().await?;
    let result = sqlx::query(INSERT_CONVERSATION)
        .bind(conversation_type.as_str())
        .bind(name)
        .bind(avatar_url)
        .bind(created_by)
        .execute(&mut *tx)
        .await?;
    let conversation_id = result.last_insert_rowid();
    for &user_id in participant_ids {
        sqlx::query(INSERT_PARTICIPANT)
            .bind(conversation_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(conversation_id)
}

pub async fn touch<C: Context>(ctx: &C, conversation_id: i64) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now') WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(conversation_id)
        .execute(ctx.db())
        .await?;
    Ok(())
}

pub async fn update_name<C: Context>(
    ctx: &C,
    conversation_id: i64,
    name: &str,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET name = ?, updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now') WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(name)
        .bind(conversation_id)
        .execute(ctx.db())
        .await?;
    Ok(())
}

pub async fn update_avatar<C: Context>(
    ctx: &C,
    conversation_id: i64,
    avatar_url: Option<&str>,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET avatar_url = ?, updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now') WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(avatar_url)
        .bind(conversation_id)
        .execute(ctx.db())
        .await?;
    Ok(())
}

/// Two-phase cascade: dependent rows first (receipts, messages, participants),
/// then the conversation itself, all in one transaction so no orphan rows can
/// survive a partial failure.
pub async fn delete_cascade<C: Context>(ctx: &C, conversation_id: i64) -> sqlx::Result<()> {
    const DELETE_RECEIPTS: &str = const_str::concat!(
        "DELETE FROM message_read_receipts WHERE message_id IN ",
        "(SELECT id FROM messages WHERE conversation_id = ?)"
    );
    const DELETE_MESSAGES: &str = "DELETE FROM messages WHERE conversation_id = ?";
    const DELETE_PARTICIPANTS: &str =
        "DELETE FROM conversation_participants WHERE conversation_id = ?";
    const DELETE_CONVERSATION: &str =
        const_str::concat!("DELETE FROM ", TABLE_NAME, " WHERE id = ?");

    let mut tx = ctx.db().begin().await?;
    sqlx::query(DELETE_RECEIPTS)
        .bind(conversation_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query(DELETE_MESSAGES)
        .bind(conversation_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query(DELETE_PARTICIPANTS)
        .bind(conversation_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query(DELETE_CONVERSATION)
        .bind(conversation_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}
