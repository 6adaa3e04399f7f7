/// Remote directory that holds the cloud backup, relative to the WebDAV root
pub const BACKUP_DIR: &str = "LedgerKeeper";

/// Remote path of the uploaded database file
pub const BACKUP_FILE: &str = "LedgerKeeper/LedgerKeeper.db";

/// Content type used for the database upload
pub const BACKUP_CONTENT_TYPE: &str = "application/octet-stream";

/// pcloud rejects PROPFIND on missing collections in a way that is not a
/// clean 404, so for this host the directory is always created first
pub const PCLOUD_HOST: &str = "webdav.pcloud.com";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for a reorder submission that is not a permutation of the
/// direction's categories
pub const ERR_NOT_A_PERMUTATION: &str =
    "Ordered ids must list every category of the direction exactly once";

/// Error message for an empty reorder submission
pub const ERR_EMPTY_ORDER: &str = "Ordered ids must not be empty";

/// Error message for a reorder submission naming a category of the other
/// direction
pub const ERR_DIRECTION_MISMATCH: &str = "Category does not belong to the requested direction";
