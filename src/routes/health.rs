use axum::{extract::State, Json};
use chrono::DateTime;
use serde_json::{json, Value};

use crate::db::categories;
use crate::AppState;

/// Health check endpoint
///
/// Returns the health status of the agent, database connectivity and the
/// time of the last successful cloud backup.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.clone();
    let (db_status, last_backup_at) = tokio::task::spawn_blocking(move || {
        let status = match db.begin_read() {
            Ok(_) => "connected",
            Err(e) => {
                tracing::error!("Database health check failed: {:?}", e);
                "disconnected"
            }
        };
        let last_backup_at = categories::last_backup_time(&db).ok().flatten();
        (status, last_backup_at)
    })
    .await
    .unwrap_or(("error", None));

    let last_backup_at = last_backup_at
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.to_rfc3339());

    Json(json!({
        "status": if db_status == "connected" { "healthy" } else { "unhealthy" },
        "database": db_status,
        "lastBackupAt": last_backup_at,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
