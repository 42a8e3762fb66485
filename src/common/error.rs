use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;
pub type ServiceResponse<T> = ServiceResult<Json<T>>;

#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!("An unexpected error has occurred at {caller}: {}", e.into());
    Err(AppError::Unexpected)
}

#[derive(Debug)]
pub enum AppError {
    Unexpected,
    Unauthorized,

    UsersInvalidSearchTerm,
    UsersNotFound,

    ConversationsNotFound,
    ConversationsUnauthorized,
    ConversationsInvalidName,
    ConversationsInvalidParticipants,
    ConversationsNotGroup,
    ConversationsMemberExists,

    MessagesEmptyContent,

    PushTokensInvalidFormat,
    PushTokensUnauthorized,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn as_str(&self) -> &str {
        self.code()
    }

    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unexpected => "unexpected",
            AppError::Unauthorized => "unauthorized",

            AppError::UsersInvalidSearchTerm => "users.invalid_search_term",
            AppError::UsersNotFound => "users.not_found",

            AppError::ConversationsNotFound => "conversations.not_found",
            AppError::ConversationsUnauthorized => "conversations.unauthorized",
            AppError::ConversationsInvalidName => "conversations.invalid_name",
            AppError::ConversationsInvalidParticipants => "conversations.invalid_participants",
            AppError::ConversationsNotGroup => "conversations.not_group",
            AppError::ConversationsMemberExists => "conversations.member_exists",

            AppError::MessagesEmptyContent => "messages.empty_content",

            AppError::PushTokensInvalidFormat => "push_tokens.invalid_format",
            AppError::PushTokensUnauthorized => "push_tokens.unauthorized",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            AppError::Unexpected => "An unexpected error has occurred.",
            AppError::Unauthorized => "You are not authorized to perform this action.",

            AppError::UsersInvalidSearchTerm => {
                "Search term must be at least 2 characters long."
            }
            AppError::UsersNotFound => "This user does not exist.",

            AppError::ConversationsNotFound => "Conversation not found.",
            AppError::ConversationsUnauthorized => {
                "You are not a participant of this conversation."
            }
            AppError::ConversationsInvalidName => "Group name must not be empty.",
            AppError::ConversationsInvalidParticipants => {
                "A group conversation needs at least one other participant."
            }
            AppError::ConversationsNotGroup => {
                "This action is only available for group conversations."
            }
            AppError::ConversationsMemberExists => {
                "This user is already a member of the conversation."
            }

            AppError::MessagesEmptyContent => "Message content must not be empty.",

            AppError::PushTokensInvalidFormat => "Invalid push token format.",
            AppError::PushTokensUnauthorized => {
                "You can only manage your own push tokens."
            }
        }
    }

    pub const fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::UsersInvalidSearchTerm
            | AppError::ConversationsInvalidName
            | AppError::ConversationsInvalidParticipants
            | AppError::ConversationsNotGroup
            | AppError::MessagesEmptyContent
            | AppError::PushTokensInvalidFormat => StatusCode::BAD_REQUEST,

            AppError::Unauthorized => StatusCode::UNAUTHORIZED,

            AppError::ConversationsUnauthorized | AppError::PushTokensUnauthorized => {
                StatusCode::FORBIDDEN
            }

            AppError::UsersNotFound | AppError::ConversationsNotFound => StatusCode::NOT_FOUND,

            AppError::ConversationsMemberExists => StatusCode::CONFLICT,

            AppError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn response_parts(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.http_status_code();
        let response = ErrorResponse {
            code: self.code(),
            message: self.message(),
        };
        (status, Json(response))
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.response_parts().into_response()
    }
}
