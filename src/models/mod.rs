use serde::Serialize;

pub mod conversations;
pub mod messages;
pub mod push_tokens;
pub mod users;

#[derive(Serialize)]
pub struct OkResponse {
    pub success: bool,
}

impl Default for OkResponse {
    fn default() -> Self {
        OkResponse { success: true }
    }
}

#[derive(Serialize)]
pub struct MarkReadResponse {
    pub marked_count: u64,
}
