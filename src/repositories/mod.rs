pub mod conversations;
pub mod messages;
pub mod participants;
pub mod push_tokens;
pub mod read_receipts;
pub mod users;
