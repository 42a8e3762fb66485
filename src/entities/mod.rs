pub mod conversations;
pub mod messages;
pub mod push_tokens;
pub mod read_receipts;
pub mod users;
