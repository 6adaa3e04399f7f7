use redb::TableDefinition;

/// Categories table: category id -> Category (bincode serialized)
pub const CATEGORIES: TableDefinition<u32, &[u8]> = TableDefinition::new("categories");

/// Meta table: well-known key -> value (bincode serialized)
/// Currently holds only the last successful backup timestamp
pub const META: TableDefinition<&str, &[u8]> = TableDefinition::new("meta");

/// Meta key for the Unix timestamp of the last successful cloud backup
pub const META_LAST_BACKUP_AT: &str = "last_backup_at";
