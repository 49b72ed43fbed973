//! Primary-market pack entity.

use pitchside_core::packs::PackSlot;
use pitchside_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A purchasable card pack. `stock` only ever decreases.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pack {
    pub id: DbId,
    pub name: String,
    pub price: i64,
    pub stock: i64,
    /// Ordered draw instructions, stored as JSONB.
    pub contents: serde_json::Value,
}

impl Pack {
    /// Parse the stored contents into typed draw instructions.
    pub fn slots(&self) -> Result<Vec<PackSlot>, serde_json::Error> {
        serde_json::from_value(self.contents.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchside_core::packs::Scarcity;

    #[test]
    fn contents_parse_into_ordered_slots() {
        let pack = Pack {
            id: 1,
            name: "Starter".into(),
            price: 100,
            stock: 5,
            contents: serde_json::json!([
                {"scarcity": "common", "count": 4},
                {"scarcity": "rare", "count": 1},
            ]),
        };

        let slots = pack.slots().unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].scarcity, Scarcity::Common);
        assert_eq!(slots[0].count, 4);
        assert_eq!(slots[1].scarcity, Scarcity::Rare);
        assert_eq!(slots[1].count, 1);
    }

    #[test]
    fn malformed_contents_fail_to_parse() {
        let pack = Pack {
            id: 1,
            name: "Broken".into(),
            price: 100,
            stock: 5,
            contents: serde_json::json!([{"scarcity": "mythic", "count": 1}]),
        };
        assert!(pack.slots().is_err());
    }
}
