//! Cloud backup orchestrator.
//!
//! Uploads the local database file to the configured WebDAV endpoint with a
//! fixed three-step pipeline: check the backup directory, create it when the
//! check reports 404, then upload. Any other non-2xx status or transport
//! fault fails the job immediately; there are no retries and no partial
//! resumption.

pub mod jobs;

pub use jobs::JobSet;

use chrono::Utc;
use reqwest::StatusCode;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{BACKUP_DIR, BACKUP_FILE};
use crate::db::{categories, Db};
use crate::error::{AppError, Result};
use crate::webdav::DavClient;

/// Pipeline step, carried in errors so failures name where they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupStep {
    DirCheck,
    DirCreate,
    Upload,
}

impl fmt::Display for BackupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupStep::DirCheck => write!(f, "directory check"),
            BackupStep::DirCreate => write!(f, "directory creation"),
            BackupStep::Upload => write!(f, "upload"),
        }
    }
}

/// User-visible progress and terminal reporting for a backup job
///
/// The service analog of the original client's progress notification and
/// success/failure toasts. Exactly one terminal call is made per job;
/// `succeeded` is skipped when the job was started without the
/// notify-on-success flag.
pub trait Notifier: Send + Sync {
    fn backup_started(&self);
    fn backup_succeeded(&self);
    fn backup_failed(&self, message: &str);
}

/// Notifier that reports through the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn backup_started(&self) {
        tracing::info!("Cloud backup started");
    }

    fn backup_succeeded(&self) {
        tracing::info!("Cloud backup finished");
    }

    fn backup_failed(&self, message: &str) {
        tracing::warn!("Cloud backup failed: {}", message);
    }
}

/// Run the backup pipeline once against the given endpoint
///
/// The pcloud host skips the existence check and always attempts directory
/// creation first; every other provider only creates the directory on 404.
pub async fn run_backup(dav: &DavClient, db_path: &Path) -> Result<()> {
    if dav.always_create_dir() {
        create_backup_dir(dav).await?;
    } else {
        let status = dav.stat_dir(BACKUP_DIR).await?;
        if status == StatusCode::NOT_FOUND {
            create_backup_dir(dav).await?;
        } else if !status.is_success() {
            return Err(AppError::UnexpectedStatus {
                step: BackupStep::DirCheck,
                status: status.as_u16(),
            });
        }
    }

    upload_database(dav, db_path).await
}

async fn create_backup_dir(dav: &DavClient) -> Result<()> {
    let status = dav.create_dir(BACKUP_DIR).await?;
    if !status.is_success() {
        return Err(AppError::UnexpectedStatus {
            step: BackupStep::DirCreate,
            status: status.as_u16(),
        });
    }
    Ok(())
}

async fn upload_database(dav: &DavClient, db_path: &Path) -> Result<()> {
    let body = tokio::fs::read(db_path).await?;
    tracing::debug!("Uploading {} bytes to {}", body.len(), BACKUP_FILE);

    let status = dav.upload(BACKUP_FILE, body).await?;
    if !status.is_success() {
        return Err(AppError::UnexpectedStatus {
            step: BackupStep::Upload,
            status: status.as_u16(),
        });
    }
    Ok(())
}

/// Run one backup job to its terminal outcome, reporting through the notifier
///
/// On success the backup timestamp is recorded in the meta table; recording
/// is best-effort, the upload has already happened.
pub async fn run_backup_job(
    dav: DavClient,
    db: Db,
    db_path: PathBuf,
    notifier: Arc<dyn Notifier>,
    notify_on_success: bool,
) {
    notifier.backup_started();

    match run_backup(&dav, &db_path).await {
        Ok(()) => {
            let now = Utc::now().timestamp();
            let record_db = db.clone();
            let recorded =
                tokio::task::spawn_blocking(move || categories::record_backup_time(&record_db, now))
                    .await;
            match recorded {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!("Failed to record backup time: {}", e),
                Err(e) => tracing::warn!("Failed to record backup time: {}", e),
            }
            if notify_on_success {
                notifier.backup_succeeded();
            }
        }
        Err(e) => notifier.backup_failed(&e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountingNotifier {
        started: AtomicUsize,
        succeeded: AtomicUsize,
        failed: AtomicUsize,
    }

    impl Notifier for CountingNotifier {
        fn backup_started(&self) {
            self.started.fetch_add(1, Ordering::SeqCst);
        }

        fn backup_succeeded(&self) {
            self.succeeded.fetch_add(1, Ordering::SeqCst);
        }

        fn backup_failed(&self, _message: &str) {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_notifies_exactly_once() {
        // Nothing listens on this port; the first request fails at the
        // transport level and the job must report failure once and stop.
        let dav = DavClient::new("http://127.0.0.1:9/", "u", "p").unwrap();

        let temp_dir = TempDir::new().unwrap();
        let db = crate::db::open_database(temp_dir.path().join("test.db")).unwrap();
        let db_path = temp_dir.path().join("test.db");

        let notifier = Arc::new(CountingNotifier::default());
        run_backup_job(dav, db, db_path, notifier.clone(), true).await;

        assert_eq!(notifier.started.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.failed.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.succeeded.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_step_display_names() {
        assert_eq!(BackupStep::DirCheck.to_string(), "directory check");
        assert_eq!(BackupStep::DirCreate.to_string(), "directory creation");
        assert_eq!(BackupStep::Upload.to_string(), "upload");
    }
}
