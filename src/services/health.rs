//! HTTP health endpoints for the bot process.
//!
//! The bot only depends on one piece of local state, the `users` table,
//! so readiness means "a profile query succeeds".

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::database::connection::DatabaseManager;
use crate::database::models::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: Status,
    pub version: String,
    pub uptime_seconds: i64,
    pub profiles: ProfileStore,
}

/// Result of counting rows in the `users` table.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileStore {
    pub reachable: bool,
    pub stored: Option<i64>,
    pub query_ms: u64,
}

impl ProfileStore {
    async fn inspect(db: &DatabaseManager) -> Self {
        let started = Instant::now();
        let stored = match Profile::count(&db.pool).await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!("health: profile table unreachable: {e}");
                None
            }
        };
        Self {
            reachable: stored.is_some(),
            stored,
            query_ms: started.elapsed().as_millis() as u64,
        }
    }
}

#[derive(Clone)]
struct HealthState {
    db: Arc<DatabaseManager>,
    started_at: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        let state = HealthState {
            db,
            started_at: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(report))
            .route("/health/ready", get(ready))
            .route("/health/live", get(|| async { Json("alive") }))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Self { router }
    }
}

/// Full report. Answers 503 with the same body when profiles can't be read.
async fn report(State(state): State<HealthState>) -> (StatusCode, Json<HealthReport>) {
    let profiles = ProfileStore::inspect(&state.db).await;
    let (code, status) = if profiles.reachable {
        (StatusCode::OK, Status::Ok)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Status::Degraded)
    };

    let report = HealthReport {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
        profiles,
    };
    (code, Json(report))
}

async fn ready(State(state): State<HealthState>) -> Result<Json<&'static str>, StatusCode> {
    if ProfileStore::inspect(&state.db).await.reachable {
        Ok(Json("ready"))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
