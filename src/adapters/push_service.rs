use crate::settings::AppSettings;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::LazyLock;

static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

#[derive(Debug, Clone, Serialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

/// Outbound push-notification transport. Object-safe so the dispatcher can be
/// exercised against a recording fake in tests.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn deliver(
        &self,
        recipient_token: &str,
        notification: &PushNotification,
    ) -> anyhow::Result<()>;
}

/// Expo-compatible HTTP transport.
pub struct ExpoPushService {
    endpoint: Option<String>,
}

impl ExpoPushService {
    pub fn new(endpoint: Option<String>) -> Self {
        ExpoPushService { endpoint }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        ExpoPushService::new(settings.push_service_url.clone())
    }
}

#[derive(Serialize)]
struct ExpoPushRequest<'a> {
    to: &'a str,
    title: &'a str,
    body: &'a str,
    data: &'a serde_json::Value,
    sound: &'a str,
}

#[async_trait]
impl PushTransport for ExpoPushService {
    async fn deliver(
        &self,
        recipient_token: &str,
        notification: &PushNotification,
    ) -> anyhow::Result<()> {
        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint,
            None => {
                tracing::warn!(title = %notification.title, "Push service url not set");
                return Ok(());
            }
        };

        let response = CLIENT
            .post(endpoint)
            .json(&ExpoPushRequest {
                to: recipient_token,
                title: &notification.title,
                body: &notification.body,
                data: &notification.data,
                sound: "default",
            })
            .send()
            .await?;
        if !response.status().is_success() {
            anyhow::bail!("push service responded with {}", response.status());
        }
        Ok(())
    }
}
