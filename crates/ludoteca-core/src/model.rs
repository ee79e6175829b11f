//! Wire types returned by the Games API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Server-assigned game identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub i64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One game as listed in the public catalogue.
///
/// The catalogue controller only ever looks at `id`; everything else is
/// passed through untouched for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: GameId,
    pub title: String,
    #[serde(default)]
    pub year_published: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub min_players: Option<u32>,
    #[serde(default)]
    pub max_players: Option<u32>,
    #[serde(default)]
    pub playing_time: Option<u32>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub designers: Vec<String>,
    #[serde(default)]
    pub nz_designer: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl GameSummary {
    /// Minimal summary, mostly useful for fixtures
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: GameId(id),
            title: title.into(),
            year_published: None,
            image_url: None,
            min_players: None,
            max_players: None,
            playing_time: None,
            average_rating: None,
            designers: Vec::new(),
            nz_designer: false,
            category: None,
            date_added: None,
        }
    }

    /// "2-4", "1+" or "5" style player range for cards
    pub fn player_range(&self) -> Option<String> {
        match (self.min_players, self.max_players) {
            (Some(min), Some(max)) if min == max => Some(min.to_string()),
            (Some(min), Some(max)) => Some(format!("{}-{}", min, max)),
            (Some(min), None) => Some(format!("{}+", min)),
            (None, Some(max)) => Some(format!("up to {}", max)),
            (None, None) => None,
        }
    }
}

/// One page of the games listing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultPage {
    pub items: Vec<GameSummary>,
    pub total: u64,
}

/// Per-category game counts.
///
/// The endpoint answers with a flat object: every category key maps to its
/// count and `all` carries the catalogue total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryCounts {
    #[serde(default)]
    pub all: u64,
    #[serde(flatten)]
    pub counts: BTreeMap<String, u64>,
}

impl CategoryCounts {
    /// Count for a category key; the "all" sentinel yields the total
    pub fn count(&self, key: &str) -> u64 {
        if key == crate::query::ALL_CATEGORIES {
            self.all
        } else {
            self.counts.get(key).copied().unwrap_or(0)
        }
    }

    /// Category keys in display order (alphabetical by label)
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.counts.keys().map(String::as_str).collect();
        keys.sort_by_key(|k| category_label(k));
        keys
    }
}

/// Human-readable label for a category key (`COOP_ADVENTURE` -> `Coop Adventure`)
pub fn category_label(key: &str) -> String {
    if key == crate::query::ALL_CATEGORIES {
        return "All".to_string();
    }
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("COOP_ADVENTURE"), "Coop Adventure");
        assert_eq!(category_label("PARTY"), "Party");
        assert_eq!(category_label("all"), "All");
        assert_eq!(category_label("GATEWAY__STRATEGY"), "Gateway Strategy");
    }

    #[test]
    fn test_category_counts_flat_json() {
        let counts: CategoryCounts =
            serde_json::from_str(r#"{"COOP_ADVENTURE": 7, "PARTY": 3, "all": 42}"#).unwrap();
        assert_eq!(counts.all, 42);
        assert_eq!(counts.count("COOP_ADVENTURE"), 7);
        assert_eq!(counts.count("all"), 42);
        assert_eq!(counts.count("MISSING"), 0);
        assert!(!counts.counts.contains_key("all"));
        assert_eq!(counts.keys(), vec!["COOP_ADVENTURE", "PARTY"]);
    }

    #[test]
    fn test_game_summary_sparse_json() {
        let game: GameSummary = serde_json::from_str(r#"{"id": 5, "title": "Azul"}"#).unwrap();
        assert_eq!(game.id, GameId(5));
        assert!(game.designers.is_empty());
        assert!(!game.nz_designer);
        assert_eq!(game.player_range(), None);
    }

    #[test]
    fn test_player_range() {
        let mut game = GameSummary::new(1, "Catan");
        game.min_players = Some(3);
        game.max_players = Some(4);
        assert_eq!(game.player_range().as_deref(), Some("3-4"));
        game.max_players = Some(3);
        assert_eq!(game.player_range().as_deref(), Some("3"));
        game.max_players = None;
        assert_eq!(game.player_range().as_deref(), Some("3+"));
    }
}
