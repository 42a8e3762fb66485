use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::OkResponse;
use crate::models::conversations::{
    AddMemberArgs, Conversation, CreateDirectArgs, CreateGroupArgs, UpdateAvatarArgs,
    UpdateNameArgs,
};
use crate::usecases::conversations;
use axum::Json;
use axum::extract::Path;

pub async fn list(ctx: RequestContext) -> ServiceResponse<Vec<Conversation>> {
    let results = conversations::fetch_all_for_user(&ctx, ctx.user_id).await?;
    Ok(Json(results))
}

pub async fn fetch_one(
    ctx: RequestContext,
    Path(conversation_id): Path<i64>,
) -> ServiceResponse<Conversation> {
    let conversation = conversations::fetch_one(&ctx, conversation_id, ctx.user_id).await?;
    Ok(Json(conversation))
}

pub async fn create_direct(
    ctx: RequestContext,
    Json(args): Json<CreateDirectArgs>,
) -> ServiceResponse<Conversation> {
    let conversation = conversations::create_direct(&ctx, ctx.user_id, args.participant_id).await?;
    Ok(Json(conversation))
}

pub async fn create_group(
    ctx: RequestContext,
    Json(args): Json<CreateGroupArgs>,
) -> ServiceResponse<Conversation> {
    let conversation = conversations::create_group(
        &ctx,
        ctx.user_id,
        &args.name,
        &args.participant_ids,
        args.avatar_url.as_deref(),
    )
    .await?;
    Ok(Json(conversation))
}

pub async fn update_name(
    ctx: RequestContext,
    Path(conversation_id): Path<i64>,
    Json(args): Json<UpdateNameArgs>,
) -> ServiceResponse<Conversation> {
    let conversation =
        conversations::update_group_name(&ctx, conversation_id, ctx.user_id, &args.name).await?;
    Ok(Json(conversation))
}

pub async fn update_avatar(
    ctx: RequestContext,
    Path(conversation_id): Path<i64>,
    Json(args): Json<UpdateAvatarArgs>,
) -> ServiceResponse<Conversation> {
    let conversation = conversations::update_group_avatar(
        &ctx,
        conversation_id,
        ctx.user_id,
        args.avatar_url.as_deref(),
    )
    .await?;
    Ok(Json(conversation))
}

pub async fn add_member(
    ctx: RequestContext,
    Path(conversation_id): Path<i64>,
    Json(args): Json<AddMemberArgs>,
) -> ServiceResponse<Conversation> {
    let conversation =
        conversations::add_member(&ctx, conversation_id, ctx.user_id, args.member_id).await?;
    Ok(Json(conversation))
}

pub async fn delete_conversation(
    ctx: RequestContext,
    Path(conversation_id): Path<i64>,
) -> ServiceResponse<OkResponse> {
    conversations::delete(&ctx, conversation_id, ctx.user_id).await?;
    Ok(Json(OkResponse::default()))
}
