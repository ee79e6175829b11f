//! Filter state, sort keys and the wire/URL query derived from them
//!
//! The same parameter names are used for the Games API request and for the
//! deep-linkable page URL:
//! `q`, `category`, `designer`, `nz_designer`, `players`, `recently_added`,
//! `sort`, `page` (plus `page_size` on the API request only).
//! Anything at its default value is left out so URLs stay canonical.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogueError;

/// Sentinel category key meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// Window (in days) sent as `recently_added` when the toggle is on
pub const RECENTLY_ADDED_DAYS: u32 = 30;

/// Catalogue ordering, one field + direction per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    TitleAsc,
    TitleDesc,
    YearAsc,
    YearDesc,
    RatingAsc,
    RatingDesc,
    TimeAsc,
    TimeDesc,
    DateAddedAsc,
    DateAddedDesc,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::TitleAsc,
            SortKey::TitleDesc,
            SortKey::YearAsc,
            SortKey::YearDesc,
            SortKey::RatingAsc,
            SortKey::RatingDesc,
            SortKey::TimeAsc,
            SortKey::TimeDesc,
            SortKey::DateAddedAsc,
            SortKey::DateAddedDesc,
        ]
    }

    /// Wire value used by the API and the URL
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::TitleAsc => "title_asc",
            SortKey::TitleDesc => "title_desc",
            SortKey::YearAsc => "year_asc",
            SortKey::YearDesc => "year_desc",
            SortKey::RatingAsc => "rating_asc",
            SortKey::RatingDesc => "rating_desc",
            SortKey::TimeAsc => "time_asc",
            SortKey::TimeDesc => "time_desc",
            SortKey::DateAddedAsc => "date_added_asc",
            SortKey::DateAddedDesc => "date_added_desc",
        }
    }

    /// Label for the sort dropdown
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::TitleAsc => "Title (A-Z)",
            SortKey::TitleDesc => "Title (Z-A)",
            SortKey::YearAsc => "Year (oldest)",
            SortKey::YearDesc => "Year (newest)",
            SortKey::RatingAsc => "Rating (lowest)",
            SortKey::RatingDesc => "Rating (highest)",
            SortKey::TimeAsc => "Play time (shortest)",
            SortKey::TimeDesc => "Play time (longest)",
            SortKey::DateAddedAsc => "Date added (oldest)",
            SortKey::DateAddedDesc => "Date added (newest)",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CatalogueError::InvalidSort(s.to_string()))
    }
}

/// User-controlled query inputs, excluding pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// What is currently typed in the search box
    pub search_text: String,
    /// Search text after the debounce window; this is what gets queried
    pub search_text_debounced: String,
    pub category: String,
    pub designer: String,
    pub nz_designer_only: bool,
    pub player_count: Option<u32>,
    pub recently_added_only: bool,
    pub sort: SortKey,
}

impl FilterState {
    pub fn new(default_sort: SortKey) -> Self {
        Self {
            search_text: String::new(),
            search_text_debounced: String::new(),
            category: ALL_CATEGORIES.to_string(),
            designer: String::new(),
            nz_designer_only: false,
            player_count: None,
            recently_added_only: false,
            sort: default_sort,
        }
    }

    /// Number of filters differing from their default. Sort order is not a filter.
    pub fn active_filter_count(&self) -> usize {
        [
            !self.search_text.trim().is_empty(),
            self.category != ALL_CATEGORIES,
            !self.designer.trim().is_empty(),
            self.nz_designer_only,
            self.player_count.is_some(),
            self.recently_added_only,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_default(&self, default_sort: SortKey) -> bool {
        *self == FilterState::new(default_sort)
    }

    /// Restore filter state from a page query string such as `?q=catan&players=4`.
    ///
    /// Unknown parameters are ignored and malformed values fall back to their
    /// defaults, so a hand-edited URL never breaks the page. The requested page
    /// (if any) is returned alongside.
    pub fn from_query_string(query_string: &str, default_sort: SortKey) -> (Self, Option<u32>) {
        let mut filters = FilterState::new(default_sort);
        let mut page = None;

        let query_string = query_string.strip_prefix('?').unwrap_or(query_string);
        for pair in query_string.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(raw);
            match key {
                "q" => {
                    filters.search_text = value.clone();
                    filters.search_text_debounced = value;
                }
                "category" if !value.is_empty() => filters.category = value,
                "designer" => filters.designer = value,
                "nz_designer" => filters.nz_designer_only = parse_flag(&value),
                "players" => filters.player_count = value.parse::<u32>().ok().filter(|n| *n > 0),
                "recently_added" => filters.recently_added_only = parse_flag(&value),
                "sort" => filters.sort = value.parse().unwrap_or(default_sort),
                "page" => page = value.parse::<u32>().ok().filter(|p| *p >= 1),
                _ => {}
            }
        }

        (filters, page)
    }

    /// Canonical query string (without the leading `?`) for this state.
    ///
    /// Uses the committed search text, omits every field at its default and
    /// omits `page` when it is 1. Returns an empty string for a pristine state.
    /// `recently_added_days` is the window written for the recently-added
    /// toggle, matching what the games query sends.
    pub fn to_query_string(&self, page: u32, default_sort: SortKey, recently_added_days: u32) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();

        if !self.search_text_debounced.is_empty() {
            params.push(("q", self.search_text_debounced.clone()));
        }
        if self.category != ALL_CATEGORIES {
            params.push(("category", self.category.clone()));
        }
        if !self.designer.is_empty() {
            params.push(("designer", self.designer.clone()));
        }
        if self.nz_designer_only {
            params.push(("nz_designer", "true".to_string()));
        }
        if let Some(players) = self.player_count {
            params.push(("players", players.to_string()));
        }
        if self.recently_added_only {
            params.push(("recently_added", recently_added_days.to_string()));
        }
        if self.sort != default_sort {
            params.push(("sort", self.sort.as_str().to_string()));
        }
        if page > 1 {
            params.push(("page", page.to_string()));
        }

        encode_pairs(&params)
    }
}

/// Wire-ready request parameters for one page of the games listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub search_text: Option<String>,
    pub category: Option<String>,
    pub designer: Option<String>,
    pub nz_designer_only: bool,
    pub player_count: Option<u32>,
    pub recently_added_days: Option<u32>,
    pub sort: SortKey,
    pub page: u32,
    pub page_size: u32,
}

impl Query {
    pub fn from_filters(filters: &FilterState, page: u32, page_size: u32, recently_added_days: u32) -> Self {
        let non_empty = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        Self {
            search_text: non_empty(&filters.search_text_debounced),
            category: (filters.category != ALL_CATEGORIES).then(|| filters.category.clone()),
            designer: non_empty(&filters.designer),
            nz_designer_only: filters.nz_designer_only,
            player_count: filters.player_count.filter(|n| *n > 0),
            recently_added_days: filters.recently_added_only.then_some(recently_added_days),
            sort: filters.sort,
            page: page.max(1),
            page_size,
        }
    }

    /// Parameters for the games-list endpoint, in a stable order
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(9);
        if let Some(q) = &self.search_text {
            params.push(("q", q.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(designer) = &self.designer {
            params.push(("designer", designer.clone()));
        }
        if self.nz_designer_only {
            params.push(("nz_designer", "true".to_string()));
        }
        if let Some(players) = self.player_count {
            params.push(("players", players.to_string()));
        }
        if let Some(days) = self.recently_added_days {
            params.push(("recently_added", days.to_string()));
        }
        params.push(("sort", self.sort.as_str().to_string()));
        params.push(("page", self.page.to_string()));
        params.push(("page_size", self.page_size.to_string()));
        params
    }

    /// `to_params` rendered as a query string
    pub fn to_query_string(&self) -> String {
        encode_pairs(&self.to_params())
    }
}

fn encode_pairs(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

fn parse_flag(value: &str) -> bool {
    !matches!(value, "" | "0" | "false")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_roundtrip_names() {
        for key in SortKey::all() {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), *key);
        }
        assert_eq!(SortKey::all().len(), 10);
        assert!(matches!("popularity".parse::<SortKey>(), Err(CatalogueError::InvalidSort(_))));
    }

    #[test]
    fn test_sort_key_serde_matches_wire_value() {
        let json = serde_json::to_string(&SortKey::DateAddedDesc).unwrap();
        assert_eq!(json, "\"date_added_desc\"");
    }

    #[test]
    fn test_default_filters_have_no_params_beyond_paging() {
        let filters = FilterState::new(SortKey::TitleAsc);
        let query = Query::from_filters(&filters, 1, 12, RECENTLY_ADDED_DAYS);
        assert_eq!(query.to_query_string(), "sort=title_asc&page=1&page_size=12");
        assert_eq!(filters.active_filter_count(), 0);
        assert!(filters.is_default(SortKey::TitleAsc));
    }

    #[test]
    fn test_query_params_follow_omission_rules() {
        let mut filters = FilterState::new(SortKey::TitleAsc);
        filters.search_text_debounced = "  ticket to ride ".to_string();
        filters.category = "COOP_ADVENTURE".to_string();
        filters.nz_designer_only = true;
        filters.player_count = Some(4);
        filters.recently_added_only = true;
        filters.sort = SortKey::RatingDesc;

        let params = Query::from_filters(&filters, 3, 12, RECENTLY_ADDED_DAYS).to_params();
        assert_eq!(
            params,
            vec![
                ("q", "ticket to ride".to_string()),
                ("category", "COOP_ADVENTURE".to_string()),
                ("nz_designer", "true".to_string()),
                ("players", "4".to_string()),
                ("recently_added", "30".to_string()),
                ("sort", "rating_desc".to_string()),
                ("page", "3".to_string()),
                ("page_size", "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_raw_search_text_is_not_queried() {
        let mut filters = FilterState::new(SortKey::TitleAsc);
        filters.search_text = "pan".to_string();
        let query = Query::from_filters(&filters, 1, 12, RECENTLY_ADDED_DAYS);
        assert_eq!(query.search_text, None);
        assert_eq!(filters.active_filter_count(), 1);
    }

    #[test]
    fn test_active_filter_count_ignores_sort() {
        let mut filters = FilterState::new(SortKey::TitleAsc);
        filters.sort = SortKey::YearDesc;
        assert_eq!(filters.active_filter_count(), 0);
        filters.designer = "Knizia".to_string();
        filters.player_count = Some(2);
        assert_eq!(filters.active_filter_count(), 2);
    }

    #[test]
    fn test_url_canonical_roundtrip() {
        let qs = "q=spirit%20island&category=COOP_ADVENTURE&nz_designer=true&players=2&recently_added=30&sort=year_desc&page=2";
        let (filters, page) = FilterState::from_query_string(qs, SortKey::TitleAsc);
        assert_eq!(filters.search_text, "spirit island");
        assert_eq!(filters.search_text_debounced, "spirit island");
        assert_eq!(filters.category, "COOP_ADVENTURE");
        assert!(filters.nz_designer_only);
        assert_eq!(filters.player_count, Some(2));
        assert!(filters.recently_added_only);
        assert_eq!(filters.sort, SortKey::YearDesc);
        assert_eq!(page, Some(2));
        assert_eq!(filters.to_query_string(2, SortKey::TitleAsc, RECENTLY_ADDED_DAYS), qs);
    }

    #[test]
    fn test_url_defaults_are_omitted() {
        let mut filters = FilterState::new(SortKey::YearDesc);
        assert_eq!(filters.to_query_string(1, SortKey::YearDesc, RECENTLY_ADDED_DAYS), "");
        filters.sort = SortKey::TitleAsc;
        assert_eq!(filters.to_query_string(1, SortKey::YearDesc, RECENTLY_ADDED_DAYS), "sort=title_asc");
    }

    #[test]
    fn test_url_recently_added_matches_query_window() {
        let mut filters = FilterState::new(SortKey::TitleAsc);
        filters.recently_added_only = true;

        let link = filters.to_query_string(1, SortKey::TitleAsc, 14);
        assert_eq!(link, "recently_added=14");
        let query = Query::from_filters(&filters, 1, 12, 14);
        assert!(query.to_query_string().contains("recently_added=14"));

        let (parsed, _) = FilterState::from_query_string(&link, SortKey::TitleAsc);
        assert!(parsed.recently_added_only);
    }

    #[test]
    fn test_url_parsing_is_tolerant() {
        let (filters, page) =
            FilterState::from_query_string("?q=a+b&players=zero&sort=bogus&page=0&utm_source=x", SortKey::YearDesc);
        assert_eq!(filters.search_text, "a b");
        assert_eq!(filters.player_count, None);
        assert_eq!(filters.sort, SortKey::YearDesc);
        assert_eq!(page, None);
    }
}
