//! v1 API handlers: register, check, activity

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::BearerToken;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::quota::AdmissionDecision;
use crate::domain::usage::UsageRecord;

const CHECK_ENDPOINT: &str = "/v1/check";
const DEFAULT_ACTIVITY_LIMIT: usize = 50;

/// Create the v1 router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/check", get(check))
        .route("/activity", get(activity))
}

/// Request to register a new owner
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub owner: String,
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
}

fn default_daily_limit() -> u32 {
    100
}

/// Response carrying the issued credential
///
/// The token is returned exactly once, here.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub token: String,
    pub owner: String,
    pub daily_limit: u32,
    pub issued_at: DateTime<Utc>,
}

/// Response for a quota check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    pub used: u64,
    pub limit: u32,
    pub remaining: u32,
    pub decision: AdmissionDecision,
}

/// Query parameters for the activity listing
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<usize>,
}

/// One activity entry
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub outcome: String,
}

/// Activity listing response
#[derive(Debug, Clone, Serialize)]
pub struct ActivityResponse {
    pub total: usize,
    pub records: Vec<ActivityEntry>,
}

impl From<&UsageRecord> for ActivityEntry {
    fn from(record: &UsageRecord) -> Self {
        Self {
            timestamp: record.timestamp,
            endpoint: record.endpoint.clone(),
            outcome: record.outcome.to_string(),
        }
    }
}

/// POST /v1/register
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let credential = state
        .credentials
        .register(&request.owner, request.daily_limit, Utc::now())
        .await?;

    let response = RegisterResponse {
        token: credential.token().as_str().to_string(),
        owner: credential.owner().to_string(),
        daily_limit: credential.daily_limit(),
        issued_at: credential.issued_at(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /v1/check
///
/// Runs one enforcement pass at the current instant. A deny is reported as
/// 429 with the same body shape as an allow.
async fn check(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.enforcer.check(&token, Utc::now(), CHECK_ENDPOINT).await?;

    let status = match result.decision {
        AdmissionDecision::Allow => StatusCode::OK,
        AdmissionDecision::Deny => StatusCode::TOO_MANY_REQUESTS,
    };

    debug!(%status, used = result.used, "Quota check served");

    let response = CheckResponse {
        used: result.used,
        limit: result.limit,
        remaining: result.remaining,
        decision: result.decision,
    };

    Ok((status, Json(response)))
}

/// GET /v1/activity
async fn activity(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Query(query): Query<ActivityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.enforcer.activity(&token).await?;
    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);

    // Most recent entries win when truncating, but the order stays ascending.
    let start = records.len().saturating_sub(limit);
    let entries: Vec<ActivityEntry> = records[start..].iter().map(ActivityEntry::from).collect();

    let response = ActivityResponse {
        total: entries.len(),
        records: entries,
    };

    Ok((StatusCode::OK, Json(response)))
}
