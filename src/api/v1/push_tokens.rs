use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::OkResponse;
use crate::models::push_tokens::{PushToken, RegisterPushTokenArgs};
use crate::usecases::push_tokens;
use axum::Json;
use axum::extract::Path;

pub async fn register(
    ctx: RequestContext,
    Json(args): Json<RegisterPushTokenArgs>,
) -> ServiceResponse<PushToken> {
    let token = push_tokens::register(&ctx, ctx.user_id, &args).await?;
    Ok(Json(token))
}

pub async fn list(ctx: RequestContext) -> ServiceResponse<Vec<PushToken>> {
    let tokens = push_tokens::fetch_all(&ctx, ctx.user_id).await?;
    Ok(Json(tokens))
}

pub async fn delete_token(
    ctx: RequestContext,
    Path(token_id): Path<i64>,
) -> ServiceResponse<OkResponse> {
    push_tokens::delete(&ctx, token_id, ctx.user_id).await?;
    Ok(Json(OkResponse::default()))
}
