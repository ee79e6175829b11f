//! Native Games API client built on reqwest

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{CATEGORY_COUNTS_PATH, GAMES_PATH, GamesApi, endpoint_url};
use crate::config::CatalogueConfig;
use crate::error::{CatalogueError, Result};
use crate::model::{CategoryCounts, ResultPage};
use crate::query::Query;

/// Games API client for native targets (CLI, tooling)
pub struct HttpGamesApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGamesApi {
    pub fn new(config: &CatalogueConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("Ludoteca/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CatalogueError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.api_base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a games-list request, as sent on the wire
    pub fn games_url(&self, query: &Query) -> String {
        format!("{}?{}", endpoint_url(&self.base_url, GAMES_PATH), query.to_query_string())
    }

    async fn get_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogueError::Http {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    body
                },
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait(?Send)]
impl GamesApi for HttpGamesApi {
    async fn fetch_games_page(&self, query: &Query) -> Result<ResultPage> {
        let url = endpoint_url(&self.base_url, GAMES_PATH);
        tracing::debug!("GET {}?{}", url, query.to_query_string());
        self.get_json(self.client.get(&url).query(&query.to_params())).await
    }

    async fn fetch_category_counts(&self) -> Result<CategoryCounts> {
        let url = endpoint_url(&self.base_url, CATEGORY_COUNTS_PATH);
        tracing::debug!("GET {}", url);
        self.get_json(self.client.get(&url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FilterState, SortKey};

    #[test]
    fn test_games_url() {
        let config = CatalogueConfig {
            api_base_url: "https://library.example.org/".to_string(),
            ..CatalogueConfig::default()
        };
        let api = HttpGamesApi::new(&config).unwrap();
        let mut filters = FilterState::new(SortKey::TitleAsc);
        filters.category = "PARTY".to_string();
        let query = Query::from_filters(&filters, 2, 12, 30);

        assert_eq!(
            api.games_url(&query),
            "https://library.example.org/api/games?category=PARTY&sort=title_asc&page=2&page_size=12"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let config = CatalogueConfig {
            // port 9 (discard) on localhost is essentially never listening
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..CatalogueConfig::default()
        };
        let api = HttpGamesApi::new(&config).unwrap();
        let err = api.fetch_category_counts().await.unwrap_err();
        assert!(matches!(err, CatalogueError::Transport(_)));
    }
}
