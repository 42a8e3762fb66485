use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Student,
    Coordinator,
    Company,
    SystemAdmin,
}

impl UserType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserType::Student => "student",
            UserType::Coordinator => "coordinator",
            UserType::Company => "company",
            UserType::SystemAdmin => "system_admin",
        }
    }
}

impl From<&str> for UserType {
    fn from(value: &str) -> Self {
        match value {
            "student" => UserType::Student,
            "coordinator" => UserType::Coordinator,
            "company" => UserType::Company,
            // Unknown tags resolve like admins: display falls back to the
            // email local part.
            _ => UserType::SystemAdmin,
        }
    }
}

impl From<String> for UserType {
    fn from(value: String) -> Self {
        UserType::from(value.as_str())
    }
}

#[derive(Debug, FromRow)]
pub struct User {
    pub id: i64,
    pub user_type: String,
    pub email: String,
    pub profile_picture_url: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, FromRow)]
pub struct StudentProfile {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub id_number: Option<String>,
}

#[derive(Debug, FromRow)]
pub struct CoordinatorProfile {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, FromRow)]
pub struct CompanyProfile {
    pub user_id: i64,
    pub company_name: String,
}

/// One row of the user search query: the user joined with whichever profile
/// table its type points at.
#[derive(Debug, FromRow)]
pub struct UserSearchRow {
    pub id: i64,
    pub user_type: String,
    pub email: String,
    pub profile_picture_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub id_number: Option<String>,
}
