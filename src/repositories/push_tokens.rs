use crate::common::context::Context;
use crate::entities::push_tokens::PushToken;
use crate::entities::users::UserType;

const TABLE_NAME: &str = "push_tokens";
const READ_FIELDS: &str = "id, user_id, push_token, user_type, created_at, updated_at";

/// Re-registering an existing (user, token) pair refreshes its user_type and
/// updated_at instead of inserting a duplicate row.
pub async fn upsert<C: Context>(
    ctx: &C,
    user_id: i64,
    push_token: &str,
    user_type: UserType,
) -> sqlx::Result<PushToken> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (user_id, push_token, user_type) VALUES (?, ?, ?) ",
        "ON CONFLICT (user_id, push_token) DO UPDATE SET ",
        "user_type = excluded.user_type, ",
        "updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')"
    );
    sqlx::query(QUERY)
        .bind(user_id)
        .bind(push_token)
        .bind(user_type.as_str())
        .execute(ctx.db())
        .await?;
    fetch_one_by_token(ctx, user_id, push_token).await
}

async fn fetch_one_by_token<C: Context>(
    ctx: &C,
    user_id: i64,
    push_token: &str,
) -> sqlx::Result<PushToken> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE user_id = ? AND push_token = ?"
    );
    sqlx::query_as(QUERY)
        .bind(user_id)
        .bind(push_token)
        .fetch_one(ctx.db())
        .await
}

pub async fn fetch_for_user<C: Context>(ctx: &C, user_id: i64) -> sqlx::Result<Vec<PushToken>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE user_id = ? ORDER BY created_at DESC, id DESC"
    );
    sqlx::query_as(QUERY)
        .bind(user_id)
        .fetch_all(ctx.db())
        .await
}

/// Owner-scoped delete; affects zero rows when the token exists but belongs
/// to someone else, which callers treat as success.
pub async fn delete<C: Context>(ctx: &C, token_id: i64, user_id: i64) -> sqlx::Result<u64> {
    const QUERY: &str =
        const_str::concat!("DELETE FROM ", TABLE_NAME, " WHERE id = ? AND user_id = ?");
    let result = sqlx::query(QUERY)
        .bind(token_id)
        .bind(user_id)
        .execute(ctx.db())
        .await?;
    Ok(result.rows_affected())
}
