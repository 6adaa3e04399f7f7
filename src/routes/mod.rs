pub mod backup;
pub mod categories;
pub mod health;

pub use backup::trigger_backup;
pub use categories::{list_categories, sort_categories};
pub use health::health_check;
