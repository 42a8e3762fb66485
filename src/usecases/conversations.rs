use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult};
use crate::entities::conversations::{Conversation as ConversationEntity, ConversationType};
use crate::entities::messages::MessageType;
use crate::entities::users::UserType;
use crate::models::conversations::{Conversation, Participant};
use crate::models::messages::Message;
use crate::repositories::{conversations, messages, participants, users};
use crate::usecases::read_receipts;
use crate::usecases::users as user_directory;
use chrono::Utc;

pub const DIRECT_CONVERSATION_NAME: &str = "Direct Message";

/// Idempotent per unordered user pair: an existing direct conversation with
/// the peer is returned instead of creating a second one. Two racing
/// first-time calls can still both miss the lookup and create duplicates;
/// `find_direct_between` settles on the oldest from then on.
pub async fn create_direct<C: Context>(
    ctx: &C,
    caller_id: i64,
    peer_id: i64,
) -> ServiceResult<Conversation> {
    if users::fetch_optional(ctx, peer_id).await?.is_none() {
        return Err(AppError::UsersNotFound);
    }

    if let Some(existing) = conversations::find_direct_between(ctx, caller_id, peer_id).await? {
        return annotate(ctx, existing, caller_id).await;
    }

    let conversation_id = conversations::create(
        ctx,
        ConversationType::Direct,
        DIRECT_CONVERSATION_NAME,
        None,
        caller_id,
        &[caller_id, peer_id],
    )
    .await?;
    let conversation = fetch_entity(ctx, conversation_id).await?;
    annotate(ctx, conversation, caller_id).await
}

pub async fn create_group<C: Context>(
    ctx: &C,
    caller_id: i64,
    name: &str,
    participant_ids: &[i64],
    avatar_url: Option<&str>,
) -> ServiceResult<Conversation> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::ConversationsInvalidName);
    }
    if participant_ids.is_empty() {
        return Err(AppError::ConversationsInvalidParticipants);
    }

    // The creator is always added exactly once, regardless of whether the
    // caller listed themselves.
    let mut members = vec![caller_id];
    for &participant_id in participant_ids {
        if participant_id != caller_id && !members.contains(&participant_id) {
            members.push(participant_id);
        }
    }
    if members.len() == 1 {
        return Err(AppError::ConversationsInvalidParticipants);
    }
    for &member_id in &members[1..] {
        if users::fetch_optional(ctx, member_id).await?.is_none() {
            return Err(AppError::UsersNotFound);
        }
    }

    let conversation_id = conversations::create(
        ctx,
        ConversationType::Group,
        name,
        avatar_url,
        caller_id,
        &members,
    )
    .await?;
    let conversation = fetch_entity(ctx, conversation_id).await?;
    annotate(ctx, conversation, caller_id).await
}

pub async fn fetch_all_for_user<C: Context>(
    ctx: &C,
    user_id: i64,
) -> ServiceResult<Vec<Conversation>> {
    let entities = conversations::fetch_for_user(ctx, user_id).await?;
    let mut results = Vec::with_capacity(entities.len());
    for entity in entities {
        results.push(annotate(ctx, entity, user_id).await?);
    }
    Ok(results)
}

pub async fn fetch_one<C: Context>(
    ctx: &C,
    conversation_id: i64,
    caller_id: i64,
) -> ServiceResult<Conversation> {
    let entity = fetch_entity(ctx, conversation_id).await?;
    ensure_active_participant(ctx, conversation_id, caller_id).await?;
    annotate(ctx, entity, caller_id).await
}

pub async fn update_group_name<C: Context>(
    ctx: &C,
    conversation_id: i64,
    caller_id: i64,
    name: &str,
) -> ServiceResult<Conversation> {
    let entity = fetch_entity(ctx, conversation_id).await?;
    ensure_active_participant(ctx, conversation_id, caller_id).await?;
    ensure_group(&entity)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::ConversationsInvalidName);
    }

    conversations::update_name(ctx, conversation_id, name).await?;
    let entity = fetch_entity(ctx, conversation_id).await?;
    annotate(ctx, entity, caller_id).await
}

pub async fn update_group_avatar<C: Context>(
    ctx: &C,
    conversation_id: i64,
    caller_id: i64,
    avatar_url: Option<&str>,
) -> ServiceResult<Conversation> {
    let entity = fetch_entity(ctx, conversation_id).await?;
    ensure_active_participant(ctx, conversation_id, caller_id).await?;
    ensure_group(&entity)?;

    conversations::update_avatar(ctx, conversation_id, avatar_url).await?;
    let entity = fetch_entity(ctx, conversation_id).await?;
    annotate(ctx, entity, caller_id).await
}

pub async fn add_member<C: Context>(
    ctx: &C,
    conversation_id: i64,
    caller_id: i64,
    member_id: i64,
) -> ServiceResult<Conversation> {
    fetch_entity(ctx, conversation_id).await?;
    ensure_active_participant(ctx, conversation_id, caller_id).await?;
    let member = match users::fetch_optional(ctx, member_id).await? {
        Some(user) => user,
        None => return Err(AppError::UsersNotFound),
    };
    if participants::is_active_participant(ctx, conversation_id, member_id).await? {
        return Err(AppError::ConversationsMemberExists);
    }

    participants::add(ctx, conversation_id, member_id).await?;
    let identity = user_directory::resolve_user(ctx, &member).await;
    let announcement = format!("{} was added to the group", identity.name);
    messages::create(
        ctx,
        conversation_id,
        caller_id,
        &announcement,
        MessageType::System,
        false,
    )
    .await?;
    conversations::touch(ctx, conversation_id).await?;

    let entity = fetch_entity(ctx, conversation_id).await?;
    annotate(ctx, entity, caller_id).await
}

pub async fn delete<C: Context>(
    ctx: &C,
    conversation_id: i64,
    caller_id: i64,
) -> ServiceResult<()> {
    fetch_entity(ctx, conversation_id).await?;
    ensure_active_participant(ctx, conversation_id, caller_id).await?;
    conversations::delete_cascade(ctx, conversation_id).await?;
    Ok(())
}

async fn fetch_entity<C: Context>(
    ctx: &C,
    conversation_id: i64,
) -> ServiceResult<ConversationEntity> {
    match conversations::fetch_optional(ctx, conversation_id).await? {
        Some(entity) => Ok(entity),
        None => Err(AppError::ConversationsNotFound),
    }
}

pub async fn ensure_active_participant<C: Context>(
    ctx: &C,
    conversation_id: i64,
    user_id: i64,
) -> ServiceResult<()> {
    match participants::is_active_participant(ctx, conversation_id, user_id).await? {
        true => Ok(()),
        false => Err(AppError::ConversationsUnauthorized),
    }
}

fn ensure_group(entity: &ConversationEntity) -> ServiceResult<()> {
    match ConversationType::from(entity.conversation_type.as_str()) {
        ConversationType::Group => Ok(()),
        ConversationType::Direct => Err(AppError::ConversationsNotGroup),
    }
}

async fn annotate<C: Context>(
    ctx: &C,
    entity: ConversationEntity,
    viewer_id: i64,
) -> ServiceResult<Conversation> {
    let now = Utc::now();

    let participant_rows = participants::fetch_active(ctx, entity.id).await?;
    let mut members = Vec::with_capacity(participant_rows.len());
    for row in participant_rows {
        let user = users::fetch_one(ctx, row.user_id).await?;
        let identity = user_directory::resolve_user(ctx, &user).await;
        members.push(Participant {
            user_id: user.id,
            user_type: UserType::from(user.user_type),
            name: identity.name,
            username: identity.username,
            profile_picture_url: user.profile_picture_url,
            joined_at: row.joined_at,
        });
    }

    let last_message = match messages::fetch_latest(ctx, entity.id).await? {
        Some(message) => {
            let sender = user_directory::resolve_by_id(ctx, message.sender_id).await;
            Some(Message::from_entity(message, sender, now))
        }
        None => None,
    };

    let unread_count = read_receipts::unread_count(ctx, entity.id, viewer_id).await?;
    Ok(Conversation::from_entity(
        entity,
        members,
        last_message,
        unread_count,
    ))
}
