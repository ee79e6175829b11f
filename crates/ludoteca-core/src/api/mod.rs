//! Games API access
//!
//! [`GamesApi`] is the seam between the catalogue and the network. The
//! browser build implements it over `fetch`, native code uses
//! [`http::HttpGamesApi`], and tests plug in an in-memory fake.

#[cfg(feature = "http")]
pub mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{CategoryCounts, ResultPage};
use crate::query::Query;

/// Path of the games listing, relative to the API base URL
pub const GAMES_PATH: &str = "/api/games";
/// Path of the per-category counts, relative to the API base URL
pub const CATEGORY_COUNTS_PATH: &str = "/api/games/category-counts";

/// Read access to the public games catalogue.
///
/// Futures are not required to be `Send`: in the browser everything runs on
/// the one event-loop thread.
#[async_trait(?Send)]
pub trait GamesApi {
    /// Fetch one page of games matching `query`
    async fn fetch_games_page(&self, query: &Query) -> Result<ResultPage>;

    /// Fetch the number of games per category, plus the `all` total
    async fn fetch_category_counts(&self) -> Result<CategoryCounts>;
}

/// Join an API base URL and an endpoint path without doubling slashes
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(endpoint_url("http://127.0.0.1:3001/", GAMES_PATH), "http://127.0.0.1:3001/api/games");
        assert_eq!(
            endpoint_url("https://library.example.org", CATEGORY_COUNTS_PATH),
            "https://library.example.org/api/games/category-counts"
        );
    }
}
