//! In-memory working copy for a category reorder session.
//!
//! A session holds one direction's categories in display order. Positional
//! moves mutate only the working copy; nothing is written until `confirm`,
//! which persists the whole order atomically through the data-access layer.

use redb::Database;

use crate::db::categories;
use crate::error::{AppError, Result};
use crate::models::{Category, Direction};

#[derive(Debug)]
pub struct ReorderSession {
    direction: Direction,
    items: Vec<Category>,
}

impl ReorderSession {
    /// Start a session over the current persisted order of one direction
    pub fn load(db: &Database, direction: Direction) -> Result<Self> {
        let items = categories::list_categories(db, direction)?;
        Ok(Self { direction, items })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn items(&self) -> &[Category] {
        &self.items
    }

    /// Move the item at `from` so it sits at `to`
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.items.len() || to >= self.items.len() {
            return Err(AppError::InvalidInput(format!(
                "Move {} -> {} out of bounds for {} items",
                from,
                to,
                self.items.len()
            )));
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(())
    }

    /// Ids of the working copy in display order
    pub fn ordered_ids(&self) -> Vec<u32> {
        self.items.iter().map(|c| c.id).collect()
    }

    /// Persist the working order as the new total order for the direction
    pub fn confirm(&self, db: &Database) -> Result<()> {
        categories::persist_reorder(db, self.direction, &self.ordered_ids())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_database;
    use tempfile::TempDir;

    fn test_db() -> (TempDir, crate::db::Db) {
        let temp_dir = TempDir::new().unwrap();
        let db = open_database(temp_dir.path().join("test.db")).unwrap();
        (temp_dir, db)
    }

    #[test]
    fn test_session_loads_persisted_order() {
        let (_tmp, db) = test_db();

        let session = ReorderSession::load(&db, Direction::Outlay).unwrap();
        let listed = categories::list_categories(&db, Direction::Outlay).unwrap();

        assert_eq!(session.direction(), Direction::Outlay);
        assert_eq!(
            session.ordered_ids(),
            listed.iter().map(|c| c.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_move_then_confirm_persists_new_order() {
        let (_tmp, db) = test_db();

        let mut session = ReorderSession::load(&db, Direction::Outlay).unwrap();
        // Drag the last item to the front: [C, A, B, ...]
        session.move_item(session.items().len() - 1, 0).unwrap();
        let expected = session.ordered_ids();

        session.confirm(&db).unwrap();

        let after = categories::list_categories(&db, Direction::Outlay).unwrap();
        assert_eq!(after.iter().map(|c| c.id).collect::<Vec<_>>(), expected);
        for (i, c) in after.iter().enumerate() {
            assert_eq!(c.ranking, i as u32);
        }
    }

    #[test]
    fn test_move_out_of_bounds_is_rejected() {
        let (_tmp, db) = test_db();

        let mut session = ReorderSession::load(&db, Direction::Income).unwrap();
        let len = session.items().len();

        assert!(session.move_item(len, 0).is_err());
        assert!(session.move_item(0, len).is_err());
    }

    #[test]
    fn test_confirm_without_moves_is_a_noop_rewrite() {
        let (_tmp, db) = test_db();

        let before = categories::list_categories(&db, Direction::Income).unwrap();
        let session = ReorderSession::load(&db, Direction::Income).unwrap();
        session.confirm(&db).unwrap();
        let after = categories::list_categories(&db, Direction::Income).unwrap();

        assert_eq!(
            before.iter().map(|c| (c.id, c.ranking)).collect::<Vec<_>>(),
            after.iter().map(|c| (c.id, c.ranking)).collect::<Vec<_>>()
        );
    }
}
