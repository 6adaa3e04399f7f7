pub mod categories;
pub mod tables;

use chrono::Utc;
use redb::{Database, ReadableTableMetadata};
use std::path::Path;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::Category;

pub const BINCODE_CONFIG: bincode::config::Configuration = bincode::config::standard();

/// Database handle type (Arc-wrapped for sharing across handlers)
pub type Db = Arc<Database>;

/// Open or create the redb database at the given path
///
/// Creates all required tables on first run and seeds the default category
/// set when the categories table is empty.
#[allow(clippy::result_large_err)]
pub fn open_database(path: impl AsRef<Path>) -> Result<Db> {
    tracing::info!("Opening database at: {:?}", path.as_ref());

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.as_ref().parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                AppError::Io(e)
            })?;
        }
    }

    let db = Database::create(path).map_err(redb::Error::from)?;

    let write_txn = db.begin_write()?;
    {
        let mut categories = write_txn.open_table(tables::CATEGORIES)?;
        let _ = write_txn.open_table(tables::META)?;

        if categories.is_empty()? {
            let now = Utc::now().timestamp();
            for category in Category::defaults(now) {
                let bytes = bincode::serde::encode_to_vec(&category, BINCODE_CONFIG)?;
                categories.insert(category.id, bytes.as_slice())?;
            }
            tracing::info!("Seeded default categories");
        }
    }
    write_txn.commit()?;

    tracing::info!("Database initialized successfully");

    Ok(Arc::new(db))
}
