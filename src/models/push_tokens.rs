use crate::entities::push_tokens::PushToken as PushTokenEntity;
use crate::entities::users::UserType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct PushToken {
    pub id: i64,
    pub user_id: i64,
    pub push_token: String,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PushTokenEntity> for PushToken {
    fn from(value: PushTokenEntity) -> Self {
        PushToken {
            id: value.id,
            user_id: value.user_id,
            push_token: value.push_token,
            user_type: UserType::from(value.user_type),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct RegisterPushTokenArgs {
    pub user_id: i64,
    pub push_token: String,
    pub user_type: UserType,
}
