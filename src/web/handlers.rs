//! HTTP request handlers for the panel API

use axum::extract::{Json, Path, State};
use axum::response::Json as ResponseJson;
use std::path::Path as FsPath;

use crate::nagios::Validation;
use crate::services::HostRequest;
use crate::status::{read_status, StatusReport};
use crate::web::{error_response, ActionResponse, ApiResult, AppState, HostsResponse};

pub async fn list_hosts(State(state): State<AppState>) -> ApiResult<HostsResponse> {
    let hosts = state.repository.list().await.map_err(error_response)?;
    Ok(ResponseJson(HostsResponse { hosts }))
}

pub async fn get_status(State(state): State<AppState>) -> ApiResult<StatusReport> {
    let report = read_status(FsPath::new(&state.config.status_file))
        .await
        .map_err(error_response)?;
    Ok(ResponseJson(report))
}

pub async fn validate_config(State(state): State<AppState>) -> ApiResult<Validation> {
    let validation = state.host_service.validate().await.map_err(error_response)?;
    Ok(ResponseJson(validation))
}

pub async fn add_host(
    State(state): State<AppState>,
    Json(request): Json<HostRequest>,
) -> ApiResult<ActionResponse> {
    let outcome = state
        .host_service
        .add_host(request)
        .await
        .map_err(error_response)?;
    Ok(ResponseJson(
        ActionResponse::success(format!("Host '{}' added", outcome.host_name))
            .with_file(outcome.file.display().to_string()),
    ))
}

pub async fn edit_host(
    State(state): State<AppState>,
    Path(original_name): Path<String>,
    Json(request): Json<HostRequest>,
) -> ApiResult<ActionResponse> {
    let outcome = state
        .host_service
        .edit_host(&original_name, request)
        .await
        .map_err(error_response)?;
    Ok(ResponseJson(
        ActionResponse::success(format!("Host '{}' updated", outcome.host_name))
            .with_file(outcome.file.display().to_string()),
    ))
}

pub async fn delete_host(
    State(state): State<AppState>,
    Path(host_name): Path<String>,
) -> ApiResult<ActionResponse> {
    let outcome = state
        .host_service
        .delete_host(&host_name)
        .await
        .map_err(error_response)?;
    Ok(ResponseJson(
        ActionResponse::success(format!("Host '{}' deleted", outcome.host_name))
            .with_valid(outcome.valid),
    ))
}

pub async fn reload_daemon(State(state): State<AppState>) -> ApiResult<ActionResponse> {
    let output = state.host_service.reload().await.map_err(error_response)?;
    Ok(ResponseJson(
        ActionResponse::success("Configuration reloaded".to_string()).with_output(output),
    ))
}
