#![allow(dead_code)]

use async_trait::async_trait;
use chat_service::adapters::push_service::{PushNotification, PushTransport};
use chat_service::common::init::MIGRATOR;
use chat_service::common::state::AppState;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// In-memory transport capturing every delivery, with an optional set of
/// tokens that simulate a dead device.
#[derive(Default)]
pub struct RecordingPush {
    pub fail_tokens: Vec<String>,
    sent: Mutex<Vec<(String, PushNotification)>>,
}

impl RecordingPush {
    pub fn failing_for(tokens: &[&str]) -> Self {
        RecordingPush {
            fail_tokens: tokens.iter().map(|token| token.to_string()).collect(),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn deliveries(&self) -> Vec<(String, PushNotification)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushTransport for RecordingPush {
    async fn deliver(
        &self,
        recipient_token: &str,
        notification: &PushNotification,
    ) -> anyhow::Result<()> {
        if self.fail_tokens.iter().any(|token| token == recipient_token) {
            anyhow::bail!("simulated transport failure");
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient_token.to_string(), notification.clone()));
        Ok(())
    }
}

pub async fn test_state() -> (AppState, Arc<RecordingPush>) {
    test_state_with_push(RecordingPush::default()).await
}

pub async fn test_state_with_push(push: RecordingPush) -> (AppState, Arc<RecordingPush>) {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    // A single connection keeps every query on the same in-memory database.
    let db: Pool<Sqlite> = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    MIGRATOR.run(&db).await.unwrap();

    let push = Arc::new(push);
    let state = AppState {
        db,
        push: push.clone(),
    };
    (state, push)
}

pub async fn seed_student(
    db: &Pool<Sqlite>,
    id: i64,
    first_name: &str,
    last_name: &str,
    id_number: Option<&str>,
    email: &str,
) {
    sqlx::query("INSERT INTO users (id, user_type, email) VALUES (?, 'student', ?)")
        .bind(id)
        .bind(email)
        .execute(db)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO students (user_id, first_name, last_name, id_number) VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(first_name)
    .bind(last_name)
    .bind(id_number)
    .execute(db)
    .await
    .unwrap();
}

pub async fn seed_coordinator(
    db: &Pool<Sqlite>,
    id: i64,
    first_name: &str,
    last_name: &str,
    email: &str,
) {
    sqlx::query("INSERT INTO users (id, user_type, email) VALUES (?, 'coordinator', ?)")
        .bind(id)
        .bind(email)
        .execute(db)
        .await
        .unwrap();
    sqlx::query("INSERT INTO coordinators (user_id, first_name, last_name) VALUES (?, ?, ?)")
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .execute(db)
        .await
        .unwrap();
}

pub async fn seed_company(db: &Pool<Sqlite>, id: i64, company_name: &str, email: &str) {
    sqlx::query("INSERT INTO users (id, user_type, email) VALUES (?, 'company', ?)")
        .bind(id)
        .bind(email)
        .execute(db)
        .await
        .unwrap();
    sqlx::query("INSERT INTO companies (user_id, company_name) VALUES (?, ?)")
        .bind(id)
        .bind(company_name)
        .execute(db)
        .await
        .unwrap();
}

pub async fn count_rows(db: &Pool<Sqlite>, query: &str, bind: i64) -> i64 {
    sqlx::query_scalar(query)
        .bind(bind)
        .fetch_one(db)
        .await
        .unwrap()
}

pub async fn seed_admin(db: &Pool<Sqlite>, id: i64, email: &str) {
    sqlx::query("INSERT INTO users (id, user_type, email) VALUES (?, 'system_admin', ?)")
        .bind(id)
        .bind(email)
        .execute(db)
        .await
        .unwrap();
}

pub async fn deactivate_user(db: &Pool<Sqlite>, id: i64) {
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = ?")
        .bind(id)
        .execute(db)
        .await
        .unwrap();
}
