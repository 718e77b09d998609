// HTTP request handlers
use crate::application::assembler::assemble;
use crate::application::refinement_service::{ChatOutcome, RefinementError};
use crate::domain::conversation::{ConversationTurn, SpecDelta};
use crate::domain::selection::DataSelection;
use crate::domain::specification::DashboardSpecification;
use crate::domain::wizard::{WizardState, WizardStep};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    retryable: bool,
}

fn error_response(status: StatusCode, error: String, retryable: bool) -> Response {
    (status, Json(ErrorBody { error, retryable })).into_response()
}

fn refinement_error_response(error: RefinementError) -> Response {
    match error {
        RefinementError::SessionNotFound(_) => {
            error_response(StatusCode::NOT_FOUND, error.to_string(), false)
        }
        RefinementError::GenerationFailed(_) => {
            tracing::error!("{:#}", error);
            error_response(StatusCode::BAD_GATEWAY, error.to_string(), true)
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Workspace snapshot: data sources, marts, and imported templates, with
/// notices for anything that failed to load.
pub async fn get_workspace(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.workspace_service.load().await)
}

/// Tables for one data source. This resource is required for the wizard to
/// proceed, so a failure is surfaced as retryable instead of an empty list.
pub async fn list_tables(
    Path(source_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.workspace_service.list_tables(&source_id).await {
        Ok(tables) => Json(tables).into_response(),
        Err(error) => {
            tracing::error!("Error fetching tables for {}: {:#}", source_id, error);
            error_response(
                StatusCode::BAD_GATEWAY,
                format!("Could not load tables for {}", source_id),
                true,
            )
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDashboardRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub selection: DataSelection,
    pub theme_id: Option<String>,
    pub layout_template_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDashboardResponse {
    pub id: String,
    pub specification: DashboardSpecification,
}

/// Quick-create path: validate the wizard gates, assemble the
/// specification, and open an editing session for it.
pub async fn create_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDashboardRequest>,
) -> Response {
    let wizard = WizardState {
        selection: Some(request.selection.clone()),
        dashboard_name: request.name.clone(),
        description: request.description.clone(),
        theme_id: request.theme_id.clone(),
        layout_template_id: request.layout_template_id.clone(),
        ..WizardState::new()
    };
    if !wizard.can_advance(WizardStep::Review) {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Dashboard name and a complete data selection are required".to_string(),
            false,
        );
    }

    let theme = match &request.theme_id {
        Some(id) => state.workspace_service.find_theme(id).await,
        None => None,
    };
    let layout = match &request.layout_template_id {
        Some(id) => state.workspace_service.find_layout_template(id).await,
        None => None,
    };

    let specification = assemble(
        &request.name,
        &request.description,
        &request.selection,
        theme.as_ref(),
        layout.as_ref(),
    );

    let id = new_dashboard_id(&request.name);
    state
        .refinement_service
        .open_session(&id, specification.clone())
        .await;

    Json(CreateDashboardResponse { id, specification }).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDashboardRequest {
    #[serde(default = "default_dashboard_name")]
    pub name: String,
    pub prompt: String,
    pub selection: DataSelection,
    pub theme_id: Option<String>,
    pub layout_template_id: Option<String>,
}

fn default_dashboard_name() -> String {
    "Untitled dashboard".to_string()
}

/// Prompt-driven path: assemble a baseline from the selection, send it with
/// the prompt to the generation collaborator, and open a session for the
/// result.
pub async fn generate_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateDashboardRequest>,
) -> Response {
    if !request.selection.is_complete() {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "A complete data selection is required".to_string(),
            false,
        );
    }

    let theme = match &request.theme_id {
        Some(id) => state.workspace_service.find_theme(id).await,
        None => None,
    };
    let layout = match &request.layout_template_id {
        Some(id) => state.workspace_service.find_layout_template(id).await,
        None => None,
    };

    let baseline = assemble(
        &request.name,
        "",
        &request.selection,
        theme.as_ref(),
        layout.as_ref(),
    );

    let id = new_dashboard_id(&request.name);
    match state
        .refinement_service
        .generate(&id, baseline, &request.prompt)
        .await
    {
        Ok(outcome) => chat_response(Some(id), outcome),
        Err(error) => refinement_error_response(error),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub specification: DashboardSpecification,
    pub transcript: Vec<ConversationTurn>,
}

/// Current specification and transcript for an open editing session.
pub async fn get_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.refinement_service.session_snapshot(&id).await {
        Ok((specification, transcript)) => Json(DashboardView {
            specification,
            transcript,
        })
        .into_response(),
        Err(error) => refinement_error_response(error),
    }
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<SpecDelta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specification: Option<DashboardSpecification>,
}

/// One refinement turn against an open editing session.
pub async fn chat(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Response {
    match state.refinement_service.chat(&id, &request.message).await {
        Ok(outcome) => chat_response(None, outcome),
        Err(error) => refinement_error_response(error),
    }
}

fn chat_response(id: Option<String>, outcome: ChatOutcome) -> Response {
    let body = match outcome {
        ChatOutcome::Conversational { reply } => ChatResponse {
            id,
            reply,
            delta: None,
            specification: None,
        },
        ChatOutcome::Updated {
            reply,
            delta,
            specification,
        } => ChatResponse {
            id,
            reply,
            delta: Some(delta),
            specification: Some(specification),
        },
        ChatOutcome::Superseded { specification } => ChatResponse {
            id,
            reply: "A newer update was already applied".to_string(),
            delta: None,
            specification: Some(specification),
        },
    };
    Json(body).into_response()
}

fn new_dashboard_id(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("{}-{}", slug.trim_matches('-'), Utc::now().timestamp_millis())
}
