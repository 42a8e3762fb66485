pub mod conversations;
pub mod messages;
pub mod push_tokens;
pub mod users;

use crate::common::state::AppState;
use axum::Router;
use axum::routing::{delete, get, post, put};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/search", get(users::search))
        .route("/conversations", get(conversations::list))
        .route("/conversations/direct", post(conversations::create_direct))
        .route("/conversations/group", post(conversations::create_group))
        .route(
            "/conversations/{conversation_id}",
            get(conversations::fetch_one).delete(conversations::delete_conversation),
        )
        .route(
            "/conversations/{conversation_id}/messages",
            get(messages::fetch_page).post(messages::send),
        )
        .route(
            "/conversations/{conversation_id}/read",
            post(messages::mark_as_read),
        )
        .route(
            "/conversations/{conversation_id}/name",
            put(conversations::update_name),
        )
        .route(
            "/conversations/{conversation_id}/avatar",
            put(conversations::update_avatar),
        )
        .route(
            "/conversations/{conversation_id}/members",
            post(conversations::add_member),
        )
        .route(
            "/push-tokens",
            get(push_tokens::list).post(push_tokens::register),
        )
        .route("/push-tokens/{token_id}", delete(push_tokens::delete_token))
}
