use crate::entities::users::UserType;
use serde::{Deserialize, Serialize};

/// Display identity resolved from whichever profile collaborator the user
/// type points at.
#[derive(Debug, Clone, Serialize)]
pub struct UserIdentity {
    pub name: String,
    pub username: String,
}

impl UserIdentity {
    pub fn unknown() -> Self {
        UserIdentity {
            name: "Unknown User".to_string(),
            username: "unknown".to_string(),
        }
    }

    /// Fallback identity from the local part of an email address.
    pub fn from_email(email: &str) -> Self {
        let local_part = email.split('@').next().unwrap_or_default();
        if local_part.is_empty() {
            return UserIdentity::unknown();
        }
        UserIdentity {
            name: local_part.to_string(),
            username: local_part.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct UserSearchResult {
    pub id: i64,
    pub user_type: UserType,
    pub name: String,
    pub username: String,
    pub email: String,
    pub profile_picture_url: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchUsersArgs {
    pub query: String,
}
