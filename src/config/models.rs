use crate::api::{models::RecordsListOptions, API_BASE_URL};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(length(min = 1, message = "API token cannot be empty"))]
    pub api_token: Cow<'static, str>,

    #[serde(default = "default_base_url")]
    #[validate(url(message = "Base URL must be a valid URL"))]
    pub base_url: Cow<'static, str>,

    #[validate(length(min = 1, message = "At least one zone is required"), nested)]
    pub zones: Vec<Zone>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Zone {
    #[validate(length(min = 1, message = "Zone ID cannot be empty"))]
    pub id: Cow<'static, str>,

    #[serde(default)]
    #[validate(range(min = 1, message = "Records per page must be greater than 0"))]
    pub per_page: Option<u32>,

    #[serde(default)]
    #[validate(range(min = 1, message = "Page must be greater than 0"))]
    pub page: Option<u32>,

    /// Record IDs to fetch individually after listing the zone.
    #[serde(default)]
    pub records: Vec<Cow<'static, str>>,
}

impl Zone {
    pub fn list_options(&self) -> RecordsListOptions {
        let defaults = RecordsListOptions::default();
        RecordsListOptions {
            items_per_page: self.per_page.unwrap_or(defaults.items_per_page),
            page: self.page.unwrap_or(defaults.page),
        }
    }
}

fn default_base_url() -> Cow<'static, str> {
    Cow::Borrowed(API_BASE_URL)
}
