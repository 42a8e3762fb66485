use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationType {
    Direct,
    Group,
}

impl ConversationType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConversationType::Direct => "direct",
            ConversationType::Group => "group",
        }
    }
}

impl From<&str> for ConversationType {
    fn from(value: &str) -> Self {
        match value {
            "group" => ConversationType::Group,
            _ => ConversationType::Direct,
        }
    }
}

impl From<String> for ConversationType {
    fn from(value: String) -> Self {
        ConversationType::from(value.as_str())
    }
}

#[derive(Debug, FromRow)]
pub struct Conversation {
    pub id: i64,
    pub conversation_type: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct ConversationParticipant {
    pub conversation_id: i64,
    pub user_id: i64,
    pub is_active: bool,
    pub joined_at: DateTime<Utc>,
    pub last_read_at: Option<DateTime<Utc>>,
}
