use serde::{Deserialize, Serialize};

/// Raw record pulled from a recommendation query.
///
/// Every field is optional on purpose: the executor never rejects a row,
/// it hands the dispatcher whatever the store returned and lets the
/// mapping step decide whether the row is usable. Queries that don't
/// compute match counts simply leave those fields unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateRow {
    pub email: Option<String>,
    pub diffbot_uri: Option<String>,
    pub first_name: Option<String>,
    pub direct_matches: Option<i64>,
    pub indirect_matches: Option<i64>,
}

impl CandidateRow {
    pub fn from_row(row: &neo4rs::Row) -> Self {
        Self {
            email: row.get("email").ok(),
            diffbot_uri: row.get("diffbotUri").ok(),
            first_name: row.get("firstName").ok(),
            direct_matches: row.get("directMatches").ok(),
            indirect_matches: row.get("indirectMatches").ok(),
        }
    }
}
