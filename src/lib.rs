//! LedgerKeeper Sync Agent Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod backup;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod reorder;
pub mod routes;
pub mod webdav;

pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use backup::{JobSet, LogNotifier, Notifier};
use webdav::DavClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
    /// Present only when a WebDAV endpoint is configured
    pub webdav: Option<DavClient>,
    /// Background backup jobs, aborted together on shutdown
    pub jobs: Arc<JobSet>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    pub fn new(db: Db, config: Config) -> Result<Self> {
        let webdav = match &config.webdav_url {
            Some(url) => Some(DavClient::new(
                url,
                &config.webdav_username,
                &config.webdav_password,
            )?),
            None => None,
        };

        Ok(Self {
            db,
            config,
            webdav,
            jobs: Arc::new(JobSet::new()),
            notifier: Arc::new(LogNotifier),
        })
    }

    /// Replace the notifier, e.g. with a counting one in tests
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}

/// Build the API router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health_check))
        .route("/api/categories", get(routes::list_categories))
        .route("/api/categories/sort", post(routes::sort_categories))
        .route("/api/backup", post(routes::trigger_backup))
        .with_state(state)
}
