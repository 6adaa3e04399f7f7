use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the ledger a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outlay,
    Income,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Outlay => write!(f, "outlay"),
            Direction::Income => write!(f, "income"),
        }
    }
}

/// Category record stored in redb
/// Uses Unix timestamp for compact storage with bincode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    /// Icon key resolved by clients, not interpreted by the agent
    pub icon: String,
    pub direction: Direction,
    /// Display position within the direction, 0-based
    pub ranking: u32,
    /// When the category was created (Unix timestamp)
    pub created_at: i64,
}

impl Category {
    /// Default category set written on first run, mirroring what a fresh
    /// install of the bookkeeping client expects to find
    pub fn defaults(now: i64) -> Vec<Category> {
        let outlay = [
            ("Food", "food"),
            ("Transport", "transport"),
            ("Shopping", "shopping"),
            ("Housing", "housing"),
            ("Entertainment", "entertainment"),
            ("Medical", "medical"),
            ("Education", "education"),
            ("Other", "other"),
        ];
        let income = [
            ("Salary", "salary"),
            ("Bonus", "bonus"),
            ("Investment", "investment"),
            ("Other", "other"),
        ];

        let mut categories = Vec::with_capacity(outlay.len() + income.len());
        let mut id = 1u32;
        for (ranking, (name, icon)) in outlay.iter().enumerate() {
            categories.push(Category {
                id,
                name: name.to_string(),
                icon: icon.to_string(),
                direction: Direction::Outlay,
                ranking: ranking as u32,
                created_at: now,
            });
            id += 1;
        }
        for (ranking, (name, icon)) in income.iter().enumerate() {
            categories.push(Category {
                id,
                name: name.to_string(),
                icon: icon.to_string(),
                direction: Direction::Income,
                ranking: ranking as u32,
                created_at: now,
            });
            id += 1;
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BINCODE_CONFIG: bincode::config::Configuration = bincode::config::standard();

    #[test]
    fn test_category_bincode_roundtrip() {
        let category = Category {
            id: 7,
            name: "Food".to_string(),
            icon: "food".to_string(),
            direction: Direction::Outlay,
            ranking: 0,
            created_at: 1733788800,
        };

        let bytes = bincode::serde::encode_to_vec(&category, BINCODE_CONFIG).unwrap();
        let (decoded, _): (Category, _) =
            bincode::serde::decode_from_slice(&bytes, BINCODE_CONFIG).unwrap();

        assert_eq!(decoded.id, 7);
        assert_eq!(decoded.name, "Food");
        assert_eq!(decoded.direction, Direction::Outlay);
        assert_eq!(decoded.ranking, 0);
    }

    #[test]
    fn test_direction_serde_names() {
        assert_eq!(
            serde_json::to_string(&Direction::Outlay).unwrap(),
            "\"outlay\""
        );
        assert_eq!(
            serde_json::from_str::<Direction>("\"income\"").unwrap(),
            Direction::Income
        );
        assert!(serde_json::from_str::<Direction>("\"both\"").is_err());
    }

    #[test]
    fn test_defaults_are_seeded_per_direction() {
        let defaults = Category::defaults(0);

        let outlay: Vec<_> = defaults
            .iter()
            .filter(|c| c.direction == Direction::Outlay)
            .collect();
        let income: Vec<_> = defaults
            .iter()
            .filter(|c| c.direction == Direction::Income)
            .collect();

        assert!(!outlay.is_empty());
        assert!(!income.is_empty());

        // Rankings are contiguous from zero within each direction
        for (i, c) in outlay.iter().enumerate() {
            assert_eq!(c.ranking, i as u32);
        }
        for (i, c) in income.iter().enumerate() {
            assert_eq!(c.ranking, i as u32);
        }

        // Ids are unique across both directions
        let mut ids: Vec<u32> = defaults.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), defaults.len());
    }
}
