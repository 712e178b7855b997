use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One issue returned by the search query.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct IssueRecord {
    pub number: u64,
    pub title: String,
    pub body: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
