use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::MarkReadResponse;
use crate::models::messages::{Message, MessagesPageArgs, SendMessageArgs};
use crate::usecases::{messages, read_receipts};
use axum::Json;
use axum::extract::{Path, Query};

pub async fn fetch_page(
    ctx: RequestContext,
    Path(conversation_id): Path<i64>,
    Query(args): Query<MessagesPageArgs>,
) -> ServiceResponse<Vec<Message>> {
    let page = messages::fetch_page(&ctx, conversation_id, ctx.user_id, args.page, args.limit)
        .await?;
    Ok(Json(page))
}

pub async fn send(
    ctx: RequestContext,
    Path(conversation_id): Path<i64>,
    Json(args): Json<SendMessageArgs>,
) -> ServiceResponse<Message> {
    let message = messages::send(
        &ctx,
        conversation_id,
        ctx.user_id,
        &args.content,
        args.message_type,
        args.is_important,
    )
    .await?;
    Ok(Json(message))
}

pub async fn mark_as_read(
    ctx: RequestContext,
    Path(conversation_id): Path<i64>,
) -> ServiceResponse<MarkReadResponse> {
    let marked_count = read_receipts::mark_as_read(&ctx, conversation_id, ctx.user_id).await?;
    Ok(Json(MarkReadResponse { marked_count }))
}
