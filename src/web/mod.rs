pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::PanelError;
use crate::inventory::{HostDefinition, HostRepository};
use crate::services::HostService;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub repository: Arc<HostRepository>,
    pub host_service: Arc<HostService>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        repository: Arc<HostRepository>,
        host_service: Arc<HostService>,
    ) -> Self {
        Self {
            config,
            repository,
            host_service,
        }
    }
}

// Helper type for API responses
pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ActionResponse>)>;

#[derive(Debug, Serialize)]
pub struct HostsResponse {
    pub hosts: Vec<HostDefinition>,
}

/// Envelope for mutation results: a success flag plus the fields relevant
/// to the operation.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl ActionResponse {
    pub fn success(message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            error: None,
            file: None,
            valid: None,
            output: None,
        }
    }

    pub fn with_file(mut self, file: String) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_valid(mut self, valid: bool) -> Self {
        self.valid = Some(valid);
        self
    }

    pub fn with_output(mut self, output: String) -> Self {
        self.output = Some(output);
        self
    }
}

/// Map a domain error to a status code plus error envelope. The validator's
/// raw output rides along for `ConfigInvalid` so the UI can show it.
pub fn error_response(err: PanelError) -> (StatusCode, Json<ActionResponse>) {
    let status = match &err {
        PanelError::ValidationInput { .. } => StatusCode::BAD_REQUEST,
        PanelError::Conflict { .. } => StatusCode::CONFLICT,
        PanelError::NotFound { .. } => StatusCode::NOT_FOUND,
        PanelError::ConfigInvalid { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        PanelError::Persistence { .. } | PanelError::Process { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let output = match &err {
        PanelError::ConfigInvalid { output } => Some(output.clone()),
        _ => None,
    };

    let body = ActionResponse {
        success: false,
        message: None,
        error: Some(err.to_string()),
        file: None,
        valid: None,
        output,
    };
    (status, Json(body))
}
