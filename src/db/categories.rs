//! Data-access layer for category records.
//!
//! All functions are synchronous and expected to run inside
//! `tokio::task::spawn_blocking` when called from request handlers.

use redb::{Database, ReadableTable};
use std::collections::{HashMap, HashSet};

use crate::constants::{ERR_DIRECTION_MISMATCH, ERR_EMPTY_ORDER, ERR_NOT_A_PERMUTATION};
use crate::db::{tables, BINCODE_CONFIG};
use crate::error::{AppError, Result};
use crate::models::{Category, Direction};

/// List all categories of one direction, ordered by ranking
pub fn list_categories(db: &Database, direction: Direction) -> Result<Vec<Category>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(tables::CATEGORIES)?;

    let mut categories = Vec::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        let (category, _): (Category, _) =
            bincode::serde::decode_from_slice(value.value(), BINCODE_CONFIG)?;
        if category.direction == direction {
            categories.push(category);
        }
    }

    categories.sort_by_key(|c| (c.ranking, c.id));
    Ok(categories)
}

/// Persist a new total order for one direction's categories
///
/// The submitted ids must be a permutation of every category of the
/// direction: no duplicates, no missing records, no ids from the other
/// direction. Rankings are rewritten as the submitted index (0-based) in a
/// single transaction; categories of the other direction are never touched.
pub fn persist_reorder(db: &Database, direction: Direction, ordered_ids: &[u32]) -> Result<()> {
    if ordered_ids.is_empty() {
        return Err(AppError::InvalidInput(ERR_EMPTY_ORDER.to_string()));
    }

    let mut seen = ordered_ids.to_vec();
    seen.sort_unstable();
    seen.dedup();
    if seen.len() != ordered_ids.len() {
        return Err(AppError::InvalidInput(ERR_NOT_A_PERMUTATION.to_string()));
    }

    let write_txn = db.begin_write()?;
    {
        let mut table = write_txn.open_table(tables::CATEGORIES)?;

        // Working copy of every record in the requested direction
        let mut existing: HashMap<u32, Category> = HashMap::new();
        let mut others: HashSet<u32> = HashSet::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            let (category, _): (Category, _) =
                bincode::serde::decode_from_slice(value.value(), BINCODE_CONFIG)?;
            if category.direction == direction {
                existing.insert(key.value(), category);
            } else {
                others.insert(key.value());
            }
        }

        if ordered_ids.len() != existing.len() {
            for &id in ordered_ids {
                if others.contains(&id) {
                    return Err(AppError::InvalidInput(ERR_DIRECTION_MISMATCH.to_string()));
                }
                if !existing.contains_key(&id) {
                    return Err(AppError::CategoryNotFound(id));
                }
            }
            return Err(AppError::InvalidInput(ERR_NOT_A_PERMUTATION.to_string()));
        }

        for (ranking, &id) in ordered_ids.iter().enumerate() {
            let mut category = match existing.remove(&id) {
                Some(category) => category,
                None if others.contains(&id) => {
                    return Err(AppError::InvalidInput(ERR_DIRECTION_MISMATCH.to_string()))
                }
                None => return Err(AppError::CategoryNotFound(id)),
            };
            category.ranking = ranking as u32;
            let bytes = bincode::serde::encode_to_vec(&category, BINCODE_CONFIG)?;
            table.insert(id, bytes.as_slice())?;
        }
    }
    write_txn.commit()?;

    tracing::info!(
        "Reordered {} {} categories",
        ordered_ids.len(),
        direction
    );

    Ok(())
}

/// Record the Unix timestamp of the last successful cloud backup
pub fn record_backup_time(db: &Database, now: i64) -> Result<()> {
    let write_txn = db.begin_write()?;
    {
        let mut meta = write_txn.open_table(tables::META)?;
        let bytes = bincode::serde::encode_to_vec(&now, BINCODE_CONFIG)?;
        meta.insert(tables::META_LAST_BACKUP_AT, bytes.as_slice())?;
    }
    write_txn.commit()?;
    Ok(())
}

/// Unix timestamp of the last successful cloud backup, if any
pub fn last_backup_time(db: &Database) -> Result<Option<i64>> {
    let read_txn = db.begin_read()?;
    let meta = read_txn.open_table(tables::META)?;

    let timestamp = meta
        .get(tables::META_LAST_BACKUP_AT)?
        .map(|v| bincode::serde::decode_from_slice(v.value(), BINCODE_CONFIG))
        .transpose()?
        .map(|(ts, _)| ts);

    Ok(timestamp)
}
