use super::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ITEMS_PER_PAGE: u32 = 100;
pub const DEFAULT_PAGE: u32 = 1;

/// A single DNS entry as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub r#type: String,
    pub id: String,
    #[serde(default)]
    pub created: Timestamp,
    #[serde(default)]
    pub modified: Timestamp,
    pub zone_id: String,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResponse {
    pub record: Record,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub records: Vec<Record>,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Pagination,
}

/// Paging state reported by the server. Zero means the field was not sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub last_page: u32,
    #[serde(default)]
    pub total_entries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsListOptions {
    #[serde(rename = "per_page")]
    pub items_per_page: u32,
    pub page: u32,
}

impl Default for RecordsListOptions {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            page: DEFAULT_PAGE,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub code: i64,
    pub message: String,
}
