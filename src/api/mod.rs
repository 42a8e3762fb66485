use crate::adapters::push_service::PushTransport;
use crate::common::context::Context;
use crate::common::error::AppError;
use crate::common::init;
use crate::common::state::AppState;
use crate::settings::AppSettings;
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::routing::get;
use sqlx::{Pool, Sqlite};
use std::net::SocketAddr;
use std::sync::Arc;

pub mod v1;

const USER_ID_HEADER: &str = "x-user-id";

pub struct RequestContext {
    pub db: Pool<Sqlite>,
    pub push: Arc<dyn PushTransport>,
    pub user_id: i64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", v1::router())
}

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let state = init::initialize_state(settings).await?;
    let app = router().with_state(state);
    let addr = SocketAddr::from((settings.app_host, settings.app_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "OK"
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Session issuance lives upstream; the gateway forwards the
        // authenticated caller id in this header.
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
            .ok_or(AppError::Unauthorized)?;
        Ok(Self {
            db: state.db.clone(),
            push: state.push.clone(),
            user_id,
        })
    }
}

impl Context for RequestContext {
    fn db(&self) -> &Pool<Sqlite> {
        &self.db
    }

    fn push(&self) -> &Arc<dyn PushTransport> {
        &self.push
    }
}
