//! Catalogue configuration
//!
//! Every field has a default so a partial TOML file (or none at all) works:
//!
//! ```toml
//! api_base_url = "https://library.example.org"
//! page_size = 12
//! default_sort = "title_asc"
//! paging_mode = "infinite_scroll"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{CatalogueError, Result};
use crate::query::{RECENTLY_ADDED_DAYS, SortKey};

/// How successive pages are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagingMode {
    /// Pages are appended to one growing, de-duplicated list
    #[default]
    InfiniteScroll,
    /// Classic numbered pages; each fetch replaces the visible items
    Paged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Fixed for the lifetime of a catalogue view
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub default_sort: SortKey,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_recently_added_days")]
    pub recently_added_days: u32,
    #[serde(default)]
    pub paging_mode: PagingMode,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:3001".to_string()
}

fn default_page_size() -> u32 {
    12
}

fn default_search_debounce_ms() -> u64 {
    150
}

fn default_recently_added_days() -> u32 {
    RECENTLY_ADDED_DAYS
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            default_sort: SortKey::TitleAsc,
            search_debounce_ms: default_search_debounce_ms(),
            recently_added_days: default_recently_added_days(),
            paging_mode: PagingMode::InfiniteScroll,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl CatalogueConfig {
    /// Preset for the numbered-pages deployment (newest first, larger pages)
    pub fn paged() -> Self {
        Self {
            page_size: 24,
            default_sort: SortKey::YearDesc,
            paging_mode: PagingMode::Paged,
            ..Self::default()
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: CatalogueConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(CatalogueError::InvalidConfig("page_size must be at least 1".to_string()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(CatalogueError::InvalidConfig("api_base_url is empty".to_string()));
        }
        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
