use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::backup;
use crate::db::categories;
use crate::error::{AppError, Result};
use crate::models::{Category, Direction};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListCategoriesParams {
    pub direction: Direction,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: u32,
    pub name: String,
    pub icon: String,
    pub direction: Direction,
    pub ranking: u32,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        let created_at = DateTime::from_timestamp(category.created_at, 0)
            .unwrap_or_else(Utc::now)
            .to_rfc3339();
        Self {
            id: category.id,
            name: category.name,
            icon: category.icon,
            direction: category.direction,
            ranking: category.ranking,
            created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SortCategoriesRequest {
    pub direction: Direction,
    #[serde(rename = "orderedIds")]
    pub ordered_ids: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct SortCategoriesResponse {
    pub success: bool,
    #[serde(rename = "backedUp")]
    pub backed_up: bool,
}

/// List all categories of one direction, ordered by ranking
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<ListCategoriesParams>,
) -> Result<Json<Vec<CategoryResponse>>> {
    let db = state.db.clone();
    let direction = params.direction;

    let categories =
        tokio::task::spawn_blocking(move || categories::list_categories(&db, direction)).await??;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Persist a new display order for one direction's categories
///
/// The submitted ids must be a permutation of every category of the
/// direction. After the local write commits, the cloud backup pipeline runs
/// when auto-backup is enabled and an endpoint is configured; a failure
/// there surfaces as the distinguished `backup_failed` error while the new
/// order stays committed.
pub async fn sort_categories(
    State(state): State<AppState>,
    Json(payload): Json<SortCategoriesRequest>,
) -> Result<Json<SortCategoriesResponse>> {
    let db = state.db.clone();
    let direction = payload.direction;
    let ordered_ids = payload.ordered_ids.clone();

    tokio::task::spawn_blocking(move || categories::persist_reorder(&db, direction, &ordered_ids))
        .await??;

    let mut backed_up = false;
    if state.config.auto_backup {
        if let Some(dav) = state.webdav.clone() {
            let db_path = PathBuf::from(&state.config.database_path);
            backup::run_backup(&dav, &db_path)
                .await
                .map_err(|e| AppError::BackupFailed(e.to_string()))?;

            let now = Utc::now().timestamp();
            let db = state.db.clone();
            let recorded =
                tokio::task::spawn_blocking(move || categories::record_backup_time(&db, now))
                    .await?;
            if let Err(e) = recorded {
                tracing::warn!("Failed to record backup time: {}", e);
            }
            backed_up = true;
        }
    }

    Ok(Json(SortCategoriesResponse {
        success: true,
        backed_up,
    }))
}
