//! Async driver pairing a [`CatalogueController`] with a [`GamesApi`]
//!
//! Requests are awaited one at a time, which is all a terminal client needs.
//! The browser frontend drives the controller itself so that page fetches
//! can overlap with filter changes.

use crate::api::GamesApi;
use crate::config::CatalogueConfig;
use crate::controller::{CatalogueController, PageOutcome, PageRequest};
use crate::error::{CatalogueError, Result};
use crate::model::CategoryCounts;

pub struct CatalogueSession<A> {
    api: A,
    controller: CatalogueController,
    last_error: Option<CatalogueError>,
}

impl<A: GamesApi> CatalogueSession<A> {
    pub fn new(api: A, config: CatalogueConfig) -> Self {
        Self::with_controller(api, CatalogueController::new(config))
    }

    pub fn with_controller(api: A, controller: CatalogueController) -> Self {
        Self {
            api,
            controller,
            last_error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn controller(&self) -> &CatalogueController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CatalogueController {
        &mut self.controller
    }

    /// Error of the most recent failed fetch, if the last fetch failed
    pub fn last_error(&self) -> Option<&CatalogueError> {
        self.last_error.as_ref()
    }

    /// Perform a request issued by the controller and fold the result back in
    pub async fn apply(&mut self, request: PageRequest) -> PageOutcome {
        let result = self.api.fetch_games_page(&request.query).await;
        self.last_error = result.as_ref().err().cloned();
        self.controller.complete(&request, result)
    }

    /// Fetch the first page for the current filters
    pub async fn start(&mut self) -> PageOutcome {
        let request = self.controller.start();
        self.apply(request).await
    }

    /// `None` when the controller had nothing to load
    pub async fn load_next_page(&mut self) -> Option<PageOutcome> {
        let request = self.controller.load_next_page()?;
        Some(self.apply(request).await)
    }

    /// Keep loading pages until everything (or at least `limit` items) is loaded.
    ///
    /// Starts the session if no page has been fetched yet. Returns the number
    /// of items loaded.
    pub async fn load_all(&mut self, limit: Option<usize>) -> Result<usize> {
        if self.controller.total().is_none() && self.start().await == PageOutcome::Failed {
            return Err(self.take_error());
        }

        while limit.is_none_or(|l| self.controller.items().len() < l) {
            match self.load_next_page().await {
                None => break,
                Some(PageOutcome::Failed) => return Err(self.take_error()),
                Some(PageOutcome::Merged { added: 0 }) => {
                    // Server total drifted below what it reported; stop rather than spin
                    tracing::warn!(
                        "Page {} added nothing new, stopping at {} items",
                        self.controller.page(),
                        self.controller.items().len()
                    );
                    break;
                }
                Some(_) => {}
            }
        }

        Ok(self.controller.items().len())
    }

    pub async fn category_counts(&self) -> Result<CategoryCounts> {
        self.api.fetch_category_counts().await
    }

    fn take_error(&mut self) -> CatalogueError {
        self.last_error.take().unwrap_or_else(|| {
            CatalogueError::Transport(self.controller.error().unwrap_or("unknown error").to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GameSummary, ResultPage};
    use crate::query::{ALL_CATEGORIES, Query};
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeMap, HashSet};

    /// In-memory catalogue answering like the real endpoint
    struct FakeApi {
        games: Vec<GameSummary>,
        fail_pages: RefCell<Vec<u32>>,
        calls: Cell<usize>,
    }

    impl FakeApi {
        fn new(count: i64) -> Self {
            let games = (0..count)
                .map(|id| {
                    let mut game = GameSummary::new(id, format!("Game {:03}", id));
                    game.category = Some(if id % 3 == 0 { "COOP_ADVENTURE" } else { "PARTY" }.to_string());
                    game
                })
                .collect();
            Self {
                games,
                fail_pages: RefCell::new(Vec::new()),
                calls: Cell::new(0),
            }
        }

        fn failing_on(self, page: u32) -> Self {
            self.fail_pages.borrow_mut().push(page);
            self
        }
    }

    #[async_trait(?Send)]
    impl GamesApi for FakeApi {
        async fn fetch_games_page(&self, query: &Query) -> Result<ResultPage> {
            self.calls.set(self.calls.get() + 1);
            let mut fail_pages = self.fail_pages.borrow_mut();
            if let Some(pos) = fail_pages.iter().position(|p| *p == query.page) {
                fail_pages.remove(pos);
                return Err(CatalogueError::Http {
                    status: 500,
                    message: "boom".to_string(),
                });
            }

            let matching: Vec<&GameSummary> = self
                .games
                .iter()
                .filter(|g| query.category.is_none() || g.category == query.category)
                .collect();
            let start = ((query.page - 1) * query.page_size) as usize;
            let items = matching
                .iter()
                .skip(start)
                .take(query.page_size as usize)
                .map(|g| (*g).clone())
                .collect();
            Ok(ResultPage {
                items,
                total: matching.len() as u64,
            })
        }

        async fn fetch_category_counts(&self) -> Result<CategoryCounts> {
            let mut counts = BTreeMap::new();
            for game in &self.games {
                if let Some(category) = &game.category {
                    *counts.entry(category.clone()).or_insert(0) += 1;
                }
            }
            Ok(CategoryCounts {
                all: self.games.len() as u64,
                counts,
            })
        }
    }

    #[tokio::test]
    async fn test_session_loads_everything_once() {
        let mut session = CatalogueSession::new(FakeApi::new(30), CatalogueConfig::default());
        assert_eq!(session.start().await, PageOutcome::Merged { added: 12 });
        assert!(!session.controller().is_complete());

        assert_eq!(session.load_all(None).await.unwrap(), 30);
        assert!(session.controller().is_complete());
        assert_eq!(session.api().calls.get(), 3);

        let unique: HashSet<_> = session.controller().items().iter().map(|g| g.id).collect();
        assert_eq!(unique.len(), 30);

        assert_eq!(session.load_next_page().await, None);
        assert_eq!(session.api().calls.get(), 3);
    }

    #[tokio::test]
    async fn test_load_all_respects_limit() {
        let mut session = CatalogueSession::new(FakeApi::new(100), CatalogueConfig::default());
        assert_eq!(session.load_all(Some(20)).await.unwrap(), 24);
        assert_eq!(session.controller().page(), 2);
    }

    #[tokio::test]
    async fn test_load_all_surfaces_failure() {
        let api = FakeApi::new(30).failing_on(2);
        let mut session = CatalogueSession::new(api, CatalogueConfig::default());

        let err = session.load_all(None).await.unwrap_err();
        assert_eq!(
            err,
            CatalogueError::Http {
                status: 500,
                message: "boom".to_string()
            }
        );
        assert_eq!(session.controller().items().len(), 12);
        assert!(session.controller().error().is_some());

        // same operation again succeeds now that the server recovered
        assert_eq!(session.load_all(None).await.unwrap(), 30);
        assert_eq!(session.controller().error(), None);
    }

    #[tokio::test]
    async fn test_response_for_superseded_filters_is_dropped() {
        let mut session = CatalogueSession::new(FakeApi::new(30), CatalogueConfig::default());
        session.start().await;

        let stale = session.controller_mut().load_next_page().unwrap();
        let stale_result = session.api().fetch_games_page(&stale.query).await;
        let fresh = session.controller_mut().set_category("COOP_ADVENTURE");

        assert_eq!(session.controller_mut().complete(&stale, stale_result), PageOutcome::Stale);
        session.apply(fresh).await;

        let controller = session.controller();
        assert_eq!(controller.items().len(), 10);
        assert!(
            controller
                .items()
                .iter()
                .all(|g| g.category.as_deref() == Some("COOP_ADVENTURE"))
        );
        assert_eq!(controller.page(), 1);
    }

    #[tokio::test]
    async fn test_category_counts_passthrough() {
        let session = CatalogueSession::new(FakeApi::new(30), CatalogueConfig::default());
        let counts = session.category_counts().await.unwrap();
        assert_eq!(counts.count(ALL_CATEGORIES), 30);
        assert_eq!(counts.count("COOP_ADVENTURE"), 10);
        assert_eq!(counts.count("PARTY"), 20);
    }
}
