use serde::{Deserialize, Serialize};

/// One row of the competitors table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    /// Primary key, assigned by the store.
    pub id: i64,
    pub competitor_name: String,
    /// Null until analyzed; overwritten on each update.
    pub competitor_positioning: Option<String>,
}

/// Narrow projection used by the batch select (id + name only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingCompetitor {
    pub id: i64,
    pub competitor_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn competitor_row_parses_null_positioning() {
        let raw = r#"{"id": 1, "competitor_name": "Acme", "competitor_positioning": null}"#;
        let row: Competitor = serde_json::from_str(raw).expect("row should parse");
        assert_eq!(row.id, 1);
        assert_eq!(row.competitor_name, "Acme");
        assert!(row.competitor_positioning.is_none());
    }

    #[test]
    fn pending_projection_ignores_extra_columns() {
        let raw = r#"{"id": 7, "competitor_name": "Globex", "competitor_positioning": "kept"}"#;
        let row: PendingCompetitor = serde_json::from_str(raw).expect("projection should parse");
        assert_eq!(row.id, 7);
        assert_eq!(row.competitor_name, "Globex");
    }
}
