use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::users::{SearchUsersArgs, UserSearchResult};
use crate::usecases::users;
use axum::Json;
use axum::extract::Query;

pub async fn search(
    ctx: RequestContext,
    Query(args): Query<SearchUsersArgs>,
) -> ServiceResponse<Vec<UserSearchResult>> {
    let results = users::search_users(&ctx, &args.query, ctx.user_id).await?;
    Ok(Json(results))
}
