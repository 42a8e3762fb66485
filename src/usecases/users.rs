use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::entities::users::{User, UserSearchRow, UserType};
use crate::models::users::{UserIdentity, UserSearchResult};
use crate::repositories::users;

const SEARCH_RESULT_LIMIT: i64 = 10;
const MIN_SEARCH_TERM_LENGTH: usize = 2;

/// Resolves a user to its display identity. Lookup misses and storage errors
/// degrade to the email fallback chain; this never fails.
pub async fn resolve_user<C: Context>(ctx: &C, user: &User) -> UserIdentity {
    let identity = match UserType::from(user.user_type.as_str()) {
        UserType::Student => match users::fetch_student(ctx, user.id).await {
            Ok(Some(profile)) => Some(student_identity(
                &profile.first_name,
                &profile.last_name,
                profile.id_number.as_deref(),
            )),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(user_id = user.id, "Failed to fetch student profile: {e}");
                None
            }
        },
        UserType::Coordinator => match users::fetch_coordinator(ctx, user.id).await {
            Ok(Some(profile)) => {
                Some(coordinator_identity(&profile.first_name, &profile.last_name))
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(user_id = user.id, "Failed to fetch coordinator profile: {e}");
                None
            }
        },
        UserType::Company => match users::fetch_company(ctx, user.id).await {
            Ok(Some(profile)) => Some(company_identity(&profile.company_name)),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(user_id = user.id, "Failed to fetch company profile: {e}");
                None
            }
        },
        UserType::SystemAdmin => None,
    };
    identity.unwrap_or_else(|| UserIdentity::from_email(&user.email))
}

pub async fn resolve_by_id<C: Context>(ctx: &C, user_id: i64) -> UserIdentity {
    match users::fetch_optional(ctx, user_id).await {
        Ok(Some(user)) => resolve_user(ctx, &user).await,
        Ok(None) => UserIdentity::unknown(),
        Err(e) => {
            tracing::warn!(user_id, "Failed to fetch user: {e}");
            UserIdentity::unknown()
        }
    }
}

pub async fn search_users<C: Context>(
    ctx: &C,
    search_term: &str,
    exclude_user_id: i64,
) -> ServiceResult<Vec<UserSearchResult>> {
    let search_term = search_term.trim();
    if search_term.chars().count() < MIN_SEARCH_TERM_LENGTH {
        return Err(AppError::UsersInvalidSearchTerm);
    }
    match users::search(ctx, search_term, exclude_user_id, SEARCH_RESULT_LIMIT).await {
        Ok(rows) => Ok(rows.into_iter().map(search_result).collect()),
        Err(e) => unexpected(e),
    }
}

fn search_result(row: UserSearchRow) -> UserSearchResult {
    let user_type = UserType::from(row.user_type.as_str());
    let identity = match user_type {
        UserType::Student => match (&row.first_name, &row.last_name) {
            (Some(first_name), Some(last_name)) => {
                student_identity(first_name, last_name, row.id_number.as_deref())
            }
            _ => UserIdentity::from_email(&row.email),
        },
        UserType::Coordinator => match (&row.first_name, &row.last_name) {
            (Some(first_name), Some(last_name)) => coordinator_identity(first_name, last_name),
            _ => UserIdentity::from_email(&row.email),
        },
        UserType::Company => match &row.company_name {
            Some(company_name) => company_identity(company_name),
            None => UserIdentity::from_email(&row.email),
        },
        UserType::SystemAdmin => UserIdentity::from_email(&row.email),
    };
    UserSearchResult {
        id: row.id,
        user_type,
        name: identity.name,
        username: identity.username,
        email: row.email,
        profile_picture_url: row.profile_picture_url,
    }
}

fn student_identity(first_name: &str, last_name: &str, id_number: Option<&str>) -> UserIdentity {
    let name = format!("{first_name} {last_name}");
    let username = match id_number {
        Some(id_number) if !id_number.is_empty() => id_number.to_string(),
        _ => name.clone(),
    };
    UserIdentity { name, username }
}

fn coordinator_identity(first_name: &str, last_name: &str) -> UserIdentity {
    UserIdentity {
        name: format!("{first_name} {last_name}"),
        username: format!("{first_name}.{last_name}"),
    }
}

fn company_identity(company_name: &str) -> UserIdentity {
    UserIdentity {
        name: company_name.to_string(),
        username: company_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_username_is_id_number() {
        let identity = student_identity("Maria", "Santos", Some("2021-00123"));
        assert_eq!(identity.name, "Maria Santos");
        assert_eq!(identity.username, "2021-00123");
    }

    #[test]
    fn student_without_id_number_falls_back_to_name() {
        let identity = student_identity("Maria", "Santos", None);
        assert_eq!(identity.username, "Maria Santos");
    }

    #[test]
    fn coordinator_username_is_dotted() {
        let identity = coordinator_identity("Juan", "Reyes");
        assert_eq!(identity.name, "Juan Reyes");
        assert_eq!(identity.username, "Juan.Reyes");
    }

    #[test]
    fn company_uses_company_name_for_both() {
        let identity = company_identity("Acme Corp");
        assert_eq!(identity.name, "Acme Corp");
        assert_eq!(identity.username, "Acme Corp");
    }
}
