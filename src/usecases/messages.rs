use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult};
use crate::common::state::AppState;
use crate::entities::messages::MessageType;
use crate::models::messages::Message;
use crate::models::users::UserIdentity;
use crate::repositories::{conversations, messages, participants};
use crate::usecases::notifications;
use crate::usecases::users as user_directory;
use chrono::Utc;
use std::collections::HashMap;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

pub async fn send<C: Context>(
    ctx: &C,
    conversation_id: i64,
    sender_id: i64,
    content: &str,
    message_type: Option<MessageType>,
    is_important: Option<bool>,
) -> ServiceResult<Message> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::MessagesEmptyContent);
    }
    if conversations::fetch_optional(ctx, conversation_id)
        .await?
        .is_none()
    {
        return Err(AppError::ConversationsNotFound);
    }
    if !participants::is_active_participant(ctx, conversation_id, sender_id).await? {
        return Err(AppError::ConversationsUnauthorized);
    }

    let message = messages::create(
        ctx,
        conversation_id,
        sender_id,
        content,
        message_type.unwrap_or_default(),
        is_important.unwrap_or(false),
    )
    .await?;
    conversations::touch(ctx, conversation_id).await?;

    let sender = user_directory::resolve_by_id(ctx, sender_id).await;

    // Delivery runs on a detached task: a slow or failing push transport can
    // neither delay nor fail the send.
    let state = AppState {
        db: ctx.db().clone(),
        push: ctx.push().clone(),
    };
    let sender_name = sender.name.clone();
    let push_content = message.content.clone();
    tokio::spawn(async move {
        notifications::notify_new_message(
            &state,
            conversation_id,
            sender_id,
            &sender_name,
            &push_content,
        )
        .await;
    });

    Ok(Message::from_entity(message, sender, Utc::now()))
}

/// One page of history, oldest-first within the page. Paging walks the log
/// newest-first (page 1 holds the latest messages) and each page is reversed
/// for display order.
pub async fn fetch_page<C: Context>(
    ctx: &C,
    conversation_id: i64,
    requester_id: i64,
    page: Option<i64>,
    limit: Option<i64>,
) -> ServiceResult<Vec<Message>> {
    if conversations::fetch_optional(ctx, conversation_id)
        .await?
        .is_none()
    {
        return Err(AppError::ConversationsNotFound);
    }
    if !participants::is_active_participant(ctx, conversation_id, requester_id).await? {
        return Err(AppError::ConversationsUnauthorized);
    }

    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let page = page.unwrap_or(1).max(1);
    let offset = (page - 1) * limit;

    let mut entities = messages::fetch_page(ctx, conversation_id, limit, offset).await?;
    entities.reverse();

    let now = Utc::now();
    let mut identities: HashMap<i64, UserIdentity> = HashMap::new();
    let mut result = Vec::with_capacity(entities.len());
    for entity in entities {
        if !identities.contains_key(&entity.sender_id) {
            let identity = user_directory::resolve_by_id(ctx, entity.sender_id).await;
            identities.insert(entity.sender_id, identity);
        }
        let sender = identities[&entity.sender_id].clone();
        result.push(Message::from_entity(entity, sender, now));
    }
    Ok(result)
}
