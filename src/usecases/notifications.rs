use crate::adapters::push_service::PushNotification;
use crate::common::state::AppState;
use crate::repositories::{participants, push_tokens, read_receipts};
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::warn;

const PUSH_SEND_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_BODY_LENGTH: usize = 100;

/// Fans a new message out to every other active participant's devices. All
/// failures end here as log lines; the send that triggered the fan-out has
/// already succeeded.
pub async fn notify_new_message(
    state: &AppState,
    conversation_id: i64,
    sender_id: i64,
    sender_name: &str,
    content: &str,
) {
    let recipients = match participants::fetch_active(state, conversation_id).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(
                conversation_id,
                "Skipping push delivery, failed to enumerate participants: {e}"
            );
            return;
        }
    };

    let notification = PushNotification {
        title: format!("New message from {sender_name}"),
        body: truncate_body(content),
        data: serde_json::json!({
            "type": "message",
            "conversationId": conversation_id,
            "senderId": sender_id,
            "senderName": sender_name,
        }),
    };

    let mut deliveries = JoinSet::new();
    for participant in recipients {
        if participant.user_id == sender_id {
            continue;
        }
        let state = state.clone();
        let notification = notification.clone();
        deliveries.spawn(async move {
            deliver_to_recipient(&state, conversation_id, participant.user_id, &notification)
                .await;
        });
    }
    while let Some(result) = deliveries.join_next().await {
        if let Err(e) = result {
            warn!(conversation_id, "Push delivery task failed: {e}");
        }
    }
}

/// A recipient with nothing unread at dispatch time is viewing the
/// conversation and has already read the triggering message client-side;
/// they are skipped entirely.
async fn deliver_to_recipient(
    state: &AppState,
    conversation_id: i64,
    recipient_id: i64,
    notification: &PushNotification,
) {
    let has_unread = match read_receipts::has_unread(state, conversation_id, recipient_id).await {
        Ok(has_unread) => has_unread,
        Err(e) => {
            warn!(recipient_id, "Skipping push delivery: {e}");
            return;
        }
    };
    if !has_unread {
        return;
    }

    let tokens = match push_tokens::fetch_for_user(state, recipient_id).await {
        Ok(tokens) => tokens,
        Err(e) => {
            warn!(recipient_id, "Failed to fetch push tokens: {e}");
            return;
        }
    };
    for token in tokens {
        let delivery = state.push.deliver(&token.push_token, notification);
        match tokio::time::timeout(PUSH_SEND_TIMEOUT, delivery).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(recipient_id, token_id = token.id, "Push delivery failed: {e}")
            }
            Err(_) => warn!(recipient_id, token_id = token.id, "Push delivery timed out"),
        }
    }
}

pub fn truncate_body(content: &str) -> String {
    if content.chars().count() <= MAX_BODY_LENGTH {
        return content.to_string();
    }
    let truncated: String = content.chars().take(MAX_BODY_LENGTH).collect();
    format!("{truncated}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_pass_through() {
        assert_eq!(truncate_body("Hello"), "Hello");
        assert_eq!(truncate_body(&"a".repeat(100)), "a".repeat(100));
    }

    #[test]
    fn long_bodies_get_ellipsis() {
        let body = truncate_body(&"a".repeat(101));
        assert_eq!(body.chars().count(), 101);
        assert!(body.ends_with('…'));
        assert!(body.starts_with(&"a".repeat(100)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let content = "ä".repeat(150);
        let body = truncate_body(&content);
        assert_eq!(body.chars().count(), 101);
        assert!(body.ends_with('…'));
    }
}
