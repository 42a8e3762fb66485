use crate::entities::conversations::{
    Conversation as ConversationEntity, ConversationType,
};
use crate::entities::users::UserType;
use crate::models::messages::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct Participant {
    pub user_id: i64,
    pub user_type: UserType,
    pub name: String,
    pub username: String,
    pub profile_picture_url: Option<String>,
    pub joined_at: DateTime<Utc>,
}

/// A conversation as the client sees it: membership resolved to display
/// identities, the most recent message and the viewer's unread count.
#[derive(Serialize)]
pub struct Conversation {
    pub id: i64,
    pub conversation_type: ConversationType,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_by: i64,
    pub participants: Vec<Participant>,
    pub last_message: Option<Message>,
    pub unread_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn from_entity(
        entity: ConversationEntity,
        participants: Vec<Participant>,
        last_message: Option<Message>,
        unread_count: i64,
    ) -> Self {
        Conversation {
            id: entity.id,
            conversation_type: ConversationType::from(entity.conversation_type),
            name: entity.name,
            avatar_url: entity.avatar_url,
            created_by: entity.created_by,
            participants,
            last_message,
            unread_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateDirectArgs {
    pub participant_id: i64,
}

#[derive(Deserialize)]
pub struct CreateGroupArgs {
    pub name: String,
    pub participant_ids: Vec<i64>,
    pub avatar_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateNameArgs {
    pub name: String,
}

#[derive(Deserialize)]
pub struct UpdateAvatarArgs {
    pub avatar_url: Option<String>,
}

#[derive(Deserialize)]
pub struct AddMemberArgs {
    pub member_id: i64,
}
