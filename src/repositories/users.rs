use crate::common::context::Context;
use crate::entities::users::{
    CompanyProfile, CoordinatorProfile, StudentProfile, User, UserSearchRow, UserType,
};

const TABLE_NAME: &str = "users";
const READ_FIELDS: &str = "id, user_type, email, profile_picture_url, is_active";

pub async fn fetch_one<C: Context>(ctx: &C, user_id: i64) -> sqlx::Result<User> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY).bind(user_id).fetch_one(ctx.db()).await
}

pub async fn fetch_optional<C: Context>(ctx: &C, user_id: i64) -> sqlx::Result<Option<User>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(user_id)
        .fetch_optional(ctx.db())
        .await
}

pub async fn fetch_student<C: Context>(
    ctx: &C,
    user_id: i64,
) -> sqlx::Result<Option<StudentProfile>> {
    const QUERY: &str =
        "SELECT user_id, first_name, last_name, id_number FROM students WHERE user_id = ?";
    sqlx::query_as(QUERY)
        .bind(user_id)
        .fetch_optional(ctx.db())
        .await
}

pub async fn fetch_coordinator<C: Context>(
    ctx: &C,
    user_id: i64,
) -> sqlx::Result<Option<CoordinatorProfile>> {
    const QUERY: &str = "SELECT user_id, first_name, last_name FROM coordinators WHERE user_id = ?";
    sqlx::query_as(QUERY)
        .bind(user_id)
        .fetch_optional(ctx.db())
        .await
}

pub async fn fetch_company<C: Context>(
    ctx: &C,
    user_id: i64,
) -> sqlx::Result<Option<CompanyProfile>> {
    const QUERY: &str = "SELECT user_id, company_name FROM companies WHERE user_id = ?";
    sqlx::query_as(QUERY)
        .bind(user_id)
        .fetch_optional(ctx.db())
        .await
}

/// Case-insensitive containment search over every field an identity can be
/// known by: first/last/full name, dotted username, company name, id number
/// and email. Inactive users and system admins never match.
pub async fn search<C: Context>(
    ctx: &C,
    search_term: &str,
    exclude_user_id: i64,
    limit: i64,
) -> sqlx::Result<Vec<UserSearchRow>> {
    const QUERY: &str = const_str::concat!(
        "SELECT u.id, u.user_type, u.email, u.profile_picture_url, ",
        "COALESCE(s.first_name, c.first_name) AS first_name, ",
        "COALESCE(s.last_name, c.last_name) AS last_name, ",
        "co.company_name AS company_name, s.id_number AS id_number ",
        "FROM ",
        TABLE_NAME,
        " u ",
        "LEFT JOIN students s ON s.user_id = u.id ",
        "LEFT JOIN coordinators c ON c.user_id = u.id ",
        "LEFT JOIN companies co ON co.user_id = u.id ",
        "WHERE u.is_active AND u.id <> ? AND u.user_type <> ? AND (",
        "u.email LIKE ? OR s.id_number LIKE ? OR co.company_name LIKE ? ",
        "OR COALESCE(s.first_name, c.first_name) LIKE ? ",
        "OR COALESCE(s.last_name, c.last_name) LIKE ? ",
        "OR (COALESCE(s.first_name, c.first_name) || ' ' || COALESCE(s.last_name, c.last_name)) LIKE ? ",
        "OR (COALESCE(s.first_name, c.first_name) || '.' || COALESCE(s.last_name, c.last_name)) LIKE ?",
        ") ORDER BY u.id LIMIT ?"
    );
    let pattern = format!("%{search_term}%");
    sqlx::query_as(QUERY)
        .bind(exclude_user_id)
        .bind(UserType::SystemAdmin.as_str())
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(ctx.db())
        .await
}
