use crate::common::time::format_relative;
use crate::entities::messages::{Message as MessageEntity, MessageType};
use crate::models::users::UserIdentity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub sender_username: String,
    pub content: String,
    pub message_type: MessageType,
    pub is_important: bool,
    pub created_at: DateTime<Utc>,
    pub time_ago: String,
}

impl Message {
    pub fn from_entity(entity: MessageEntity, sender: UserIdentity, now: DateTime<Utc>) -> Self {
        Message {
            id: entity.id,
            conversation_id: entity.conversation_id,
            sender_id: entity.sender_id,
            sender_name: sender.name,
            sender_username: sender.username,
            content: entity.content,
            message_type: MessageType::from(entity.message_type),
            is_important: entity.is_important,
            created_at: entity.created_at,
            time_ago: format_relative(now, entity.created_at),
        }
    }
}

#[derive(Deserialize)]
pub struct SendMessageArgs {
    pub content: String,
    pub message_type: Option<MessageType>,
    pub is_important: Option<bool>,
}

#[derive(Deserialize)]
pub struct MessagesPageArgs {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
