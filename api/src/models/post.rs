use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single anonymous company-exposure entry. Posts are never edited once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub company: String,
    pub city_code: String,
    pub city_name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<i64>, // Unix seconds
    pub created_at: i64, // Unix seconds
}

impl Post {
    /// Lowercased `company content` text used for keyword matching.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.company, self.content).to_lowercase()
    }
}
