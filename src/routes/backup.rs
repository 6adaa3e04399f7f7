use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::backup::run_backup_job;
use crate::error::{AppError, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TriggerBackupRequest {
    /// Report success through the notifier as well; failures are always
    /// reported
    #[serde(rename = "notifyOnSuccess", default)]
    pub notify_on_success: bool,
}

#[derive(Debug, Serialize)]
pub struct TriggerBackupResponse {
    pub started: bool,
}

/// Trigger a cloud backup as a background job
///
/// Returns 202 once the job is spawned into the agent's job group; the
/// terminal outcome is reported through the notifier, not this response.
/// Returns 412 when no WebDAV endpoint is configured.
pub async fn trigger_backup(
    State(state): State<AppState>,
    Json(payload): Json<TriggerBackupRequest>,
) -> Result<(StatusCode, Json<TriggerBackupResponse>)> {
    let Some(dav) = state.webdav.clone() else {
        return Err(AppError::CloudNotConfigured);
    };

    let db = state.db.clone();
    let db_path = PathBuf::from(&state.config.database_path);
    let notifier = state.notifier.clone();

    state
        .jobs
        .spawn(run_backup_job(
            dav,
            db,
            db_path,
            notifier,
            payload.notify_on_success,
        ))
        .await;

    tracing::info!("Cloud backup job started");

    Ok((StatusCode::ACCEPTED, Json(TriggerBackupResponse { started: true })))
}
