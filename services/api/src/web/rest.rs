//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use chrono::{DateTime, Utc};
use essay_checker_core::domain::{AnalysisResult, EssayDraft, EssayRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// The fixed error message returned whenever an analysis request fails,
/// regardless of the underlying cause.
pub const ANALYZE_FAILURE_MESSAGE: &str = "Failed to analyze essay";

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        analyze_essay_handler,
        list_essays_handler,
        create_essay_handler,
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
    ),
    components(
        schemas(
            AnalyzeRequest,
            AnalysisPayload,
            ErrorResponse,
            EssayResponse,
            CreateEssayRequest,
            CreateEssayResponse,
            crate::web::auth::SignupRequest,
            crate::web::auth::LoginRequest,
            crate::web::auth::AuthResponse,
        )
    ),
    tags(
        (name = "Essay Checker API", description = "API endpoints for AI-assisted essay analysis.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Request, Response and Payload Structs
//=========================================================================================

/// The three free-text fields the workspace submits for analysis. None of
/// them is validated for length or emptiness before being forwarded.
#[derive(Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    pub essay: String,
    pub prompt: String,
    pub guidelines: String,
}

/// The wire shape of an analysis: the two result lists, both always present.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub questions: Vec<String>,
}

impl From<AnalysisResult> for AnalysisPayload {
    fn from(result: AnalysisResult) -> Self {
        Self {
            suggestions: result.suggestions,
            questions: result.questions,
        }
    }
}

impl From<AnalysisPayload> for AnalysisResult {
    fn from(payload: AnalysisPayload) -> Self {
        Self {
            suggestions: payload.suggestions,
            questions: payload.questions,
        }
    }
}

/// The body of every failure response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// One stored essay, as returned to its owner.
#[derive(Serialize, ToSchema)]
pub struct EssayResponse {
    pub id: Uuid,
    pub prompt: String,
    pub guidelines: String,
    pub content: String,
    pub analysis: AnalysisPayload,
    pub created_at: DateTime<Utc>,
}

impl From<EssayRecord> for EssayResponse {
    fn from(record: EssayRecord) -> Self {
        Self {
            id: record.id,
            prompt: record.prompt,
            guidelines: record.guidelines,
            content: record.content,
            analysis: record.analysis.into(),
            created_at: record.created_at,
        }
    }
}

/// The workspace's append step: the submitted fields plus the analysis it
/// just received back from `/api/analyze`.
#[derive(Deserialize, ToSchema)]
pub struct CreateEssayRequest {
    pub prompt: String,
    pub guidelines: String,
    pub content: String,
    pub analysis: AnalysisPayload,
}

#[derive(Serialize, ToSchema)]
pub struct CreateEssayResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

fn internal_error(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Analyze an essay against its prompt and guidelines.
///
/// Stateless: the handler only performs the outbound model call and never
/// persists anything, so repeated calls with identical input produce
/// independent new analyses. Persistence is the caller's follow-up step
/// via `POST /api/essays`.
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis produced", body = AnalysisPayload),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Analysis failed", body = ErrorResponse)
    )
)]
pub async fn analyze_essay_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    match app_state
        .analysis
        .analyze_essay(&req.essay, &req.prompt, &req.guidelines)
        .await
    {
        Ok(outcome) => {
            if outcome.is_degraded() {
                warn!("Model output was not valid JSON; returning the empty analysis");
            }
            Ok(Json(AnalysisPayload::from(outcome.into_result())))
        }
        Err(e) => {
            error!("Error analyzing essay: {:?}", e);
            Err(internal_error(ANALYZE_FAILURE_MESSAGE))
        }
    }
}

/// List every essay belonging to the authenticated user, newest first.
#[utoipa::path(
    get,
    path = "/api/essays",
    responses(
        (status = 200, description = "The caller's essays", body = [EssayResponse]),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_essays_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    match app_state.store.list_essays_by_owner(user_id).await {
        Ok(records) => {
            let essays: Vec<EssayResponse> =
                records.into_iter().map(EssayResponse::from).collect();
            Ok(Json(essays))
        }
        Err(e) => {
            error!("Failed to list essays for user {}: {:?}", user_id, e);
            Err(internal_error("Failed to load essays"))
        }
    }
}

/// Store an analyzed essay for the authenticated user.
///
/// Append-only; there is no deduplication, so submitting the same essay
/// twice creates two records.
#[utoipa::path(
    post,
    path = "/api/essays",
    request_body = CreateEssayRequest,
    responses(
        (status = 201, description = "Essay stored", body = CreateEssayResponse),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_essay_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<CreateEssayRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let draft = EssayDraft {
        owner_id: user_id,
        prompt: req.prompt,
        guidelines: req.guidelines,
        content: req.content,
        analysis: req.analysis.into(),
    };

    match app_state.store.append_essay(draft).await {
        Ok(record) => Ok((
            StatusCode::CREATED,
            Json(CreateEssayResponse {
                id: record.id,
                created_at: record.created_at,
            }),
        )),
        Err(e) => {
            error!("Failed to store essay for user {}: {:?}", user_id, e);
            Err(internal_error("Failed to save essay"))
        }
    }
}
