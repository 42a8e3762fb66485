use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult};
use crate::repositories::{conversations, participants, read_receipts};

pub async fn unread_count<C: Context>(
    ctx: &C,
    conversation_id: i64,
    user_id: i64,
) -> ServiceResult<i64> {
    Ok(read_receipts::unread_count(ctx, conversation_id, user_id).await?)
}

/// Cheap existence probe; used to gate push delivery without materializing
/// the full count.
pub async fn has_unread<C: Context>(
    ctx: &C,
    conversation_id: i64,
    user_id: i64,
) -> ServiceResult<bool> {
    Ok(read_receipts::has_unread(ctx, conversation_id, user_id).await?)
}

/// Receipts every currently-unread message for the caller. Repeating the call
/// marks nothing new and returns 0.
pub async fn mark_as_read<C: Context>(
    ctx: &C,
    conversation_id: i64,
    user_id: i64,
) -> ServiceResult<u64> {
    if conversations::fetch_optional(ctx, conversation_id)
        .await?
        .is_none()
    {
        return Err(AppError::ConversationsNotFound);
    }
    if !participants::is_active_participant(ctx, conversation_id, user_id).await? {
        return Err(AppError::ConversationsUnauthorized);
    }

    let marked = read_receipts::mark_conversation_read(ctx, conversation_id, user_id).await?;
    participants::set_last_read(ctx, conversation_id, user_id).await?;
    Ok(marked)
}
