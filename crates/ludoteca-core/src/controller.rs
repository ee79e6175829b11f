//! Catalogue query, pagination and infinite-scroll state
//!
//! The controller never performs I/O. Every operation that needs data returns
//! a [`PageRequest`]; the host fetches it (browser `fetch`, reqwest, a test
//! fake...) and hands the result back to [`CatalogueController::complete`].
//!
//! Each filter change bumps a generation counter. Requests carry the
//! generation they were issued for, so a response that resolves after the
//! filters moved on is recognised as stale and dropped instead of merged.

use std::collections::HashSet;

use crate::config::{CatalogueConfig, PagingMode};
use crate::debounce::{DebounceTicket, Debouncer};
use crate::error::CatalogueError;
use crate::model::{GameId, GameSummary, ResultPage};
use crate::query::{ALL_CATEGORIES, FilterState, Query, SortKey};

/// A page fetch the host must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub page: u32,
    pub query: Query,
}

/// What [`CatalogueController::complete`] did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Response applied; `added` counts genuinely new items
    Merged { added: usize },
    /// Response belonged to superseded filters and was discarded
    Stale,
    /// Fetch failed; accumulated results left untouched
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    generation: u64,
    page: u32,
}

#[derive(Debug, Clone)]
pub struct CatalogueController {
    config: CatalogueConfig,
    filters: FilterState,
    search: Debouncer<String>,
    generation: u64,
    page: u32,
    items: Vec<GameSummary>,
    seen: HashSet<GameId>,
    total: Option<u64>,
    in_flight: Option<InFlight>,
    error: Option<String>,
    failed_page: Option<u32>,
    /// A short page or one with nothing new ended the listing early
    exhausted: bool,
}

impl CatalogueController {
    pub fn new(config: CatalogueConfig) -> Self {
        let filters = FilterState::new(config.default_sort);
        Self {
            config,
            filters,
            search: Debouncer::new(),
            generation: 0,
            page: 1,
            items: Vec::new(),
            seen: HashSet::new(),
            total: None,
            in_flight: None,
            error: None,
            failed_page: None,
            exhausted: false,
        }
    }

    /// Build a controller with pre-set filters (nothing is fetched yet)
    pub fn with_filters(config: CatalogueConfig, filters: FilterState) -> Self {
        let mut controller = Self::new(config);
        controller.filters = filters;
        controller
    }

    /// Build a controller whose filters come from a page URL query string.
    ///
    /// A `page` parameter is only honoured in [`PagingMode::Paged`]; an
    /// infinite-scroll session always starts from the first page.
    pub fn from_query_string(config: CatalogueConfig, query_string: &str) -> Self {
        let (filters, page) = FilterState::from_query_string(query_string, config.default_sort);
        let mut controller = Self::with_filters(config, filters);
        if controller.config.paging_mode == PagingMode::Paged {
            controller.page = page.unwrap_or(1);
        }
        controller
    }

    /// Begin the first fetch cycle for the current filters
    pub fn start(&mut self) -> PageRequest {
        self.generation += 1;
        self.reset_results();
        self.issue(self.page)
    }

    // ============ Filter setters ============

    /// Store the raw search text and schedule its debounced commit.
    ///
    /// The host waits `config().search_debounce()` and then calls
    /// [`Self::commit_search`] with the returned ticket.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> DebounceTicket {
        let text = text.into();
        self.filters.search_text = text.clone();
        self.search.schedule(text)
    }

    /// Commit a debounced search value.
    ///
    /// Superseded tickets and values equal to the current query are no-ops.
    pub fn commit_search(&mut self, ticket: DebounceTicket) -> Option<PageRequest> {
        let text = self.search.commit(ticket)?;
        if text == self.filters.search_text_debounced {
            return None;
        }
        self.filters.search_text_debounced = text;
        Some(self.filters_changed())
    }

    pub fn set_category(&mut self, key: impl Into<String>) -> PageRequest {
        let key = key.into();
        self.filters.category = if key.is_empty() { ALL_CATEGORIES.to_string() } else { key };
        self.filters_changed()
    }

    pub fn set_designer(&mut self, designer: impl Into<String>) -> PageRequest {
        self.filters.designer = designer.into();
        self.filters_changed()
    }

    pub fn set_nz_designer_only(&mut self, only: bool) -> PageRequest {
        self.filters.nz_designer_only = only;
        self.filters_changed()
    }

    /// `None` (or zero) removes the player-count filter
    pub fn set_player_count(&mut self, players: Option<u32>) -> PageRequest {
        self.filters.player_count = players.filter(|n| *n > 0);
        self.filters_changed()
    }

    pub fn set_recently_added_only(&mut self, only: bool) -> PageRequest {
        self.filters.recently_added_only = only;
        self.filters_changed()
    }

    pub fn set_sort(&mut self, sort: SortKey) -> PageRequest {
        self.filters.sort = sort;
        self.filters_changed()
    }

    /// Reset every filter at once; this is a single filter change
    pub fn clear_all_filters(&mut self) -> PageRequest {
        self.search.cancel();
        self.filters = FilterState::new(self.config.default_sort);
        self.filters_changed()
    }

    // ============ Paging ============

    /// Request the page after the last one loaded.
    ///
    /// Returns `None` while any fetch is in flight, before the first page has
    /// arrived, or once every result has been loaded. The listing also counts
    /// as loaded after a short page or a page with no new items, since the
    /// server total can drift while browsing.
    pub fn load_next_page(&mut self) -> Option<PageRequest> {
        if let Some(in_flight) = self.in_flight {
            tracing::trace!("load_next_page ignored, page {} in flight", in_flight.page);
            return None;
        }
        if self.total.is_none() || self.is_complete() {
            return None;
        }
        self.page += 1;
        Some(self.issue(self.page))
    }

    /// Jump to a numbered page (paged mode).
    ///
    /// Supersedes whatever was in flight; items stay visible until the new
    /// page arrives.
    pub fn go_to_page(&mut self, page: u32) -> Option<PageRequest> {
        let last = self.page_count().unwrap_or(1).max(1);
        let page = page.clamp(1, last);
        if page == self.page && self.in_flight.is_none() && self.error.is_none() {
            return None;
        }
        self.generation += 1;
        self.page = page;
        self.error = None;
        self.failed_page = None;
        Some(self.issue(page))
    }

    /// Re-issue the page whose fetch last failed
    pub fn retry(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let page = self.failed_page.take()?;
        self.page = page;
        Some(self.issue(page))
    }

    /// Drop everything loaded and fetch from the first page again
    pub fn refresh(&mut self) -> PageRequest {
        self.filters_changed()
    }

    /// Fold a fetch result back into the controller
    pub fn complete(
        &mut self,
        request: &PageRequest,
        result: Result<ResultPage, CatalogueError>,
    ) -> PageOutcome {
        let current = InFlight {
            generation: request.generation,
            page: request.page,
        };
        if request.generation != self.generation || self.in_flight != Some(current) {
            tracing::debug!(
                "Discarding stale page {} (generation {}, current {})",
                request.page,
                request.generation,
                self.generation
            );
            return PageOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(result_page) => {
                self.total = Some(result_page.total);
                self.error = None;
                self.failed_page = None;
                let short = result_page.items.len() < self.config.page_size as usize;
                let added = match self.config.paging_mode {
                    PagingMode::InfiniteScroll => self.merge(result_page.items),
                    PagingMode::Paged => self.replace(result_page.items),
                };
                if self.config.paging_mode == PagingMode::InfiniteScroll && (short || added == 0) {
                    self.exhausted = true;
                }
                tracing::debug!(
                    "Page {} merged: {} new, {} loaded of {}",
                    request.page,
                    added,
                    self.items.len(),
                    result_page.total
                );
                PageOutcome::Merged { added }
            }
            Err(err) => {
                tracing::warn!("Failed to load page {}: {}", request.page, err);
                self.error = Some(err.to_string());
                self.failed_page = Some(request.page);
                if self.config.paging_mode == PagingMode::InfiniteScroll && request.page > 1 {
                    self.page = request.page - 1;
                }
                PageOutcome::Failed
            }
        }
    }

    /// Invalidate pending debounce and in-flight work when the view goes away
    pub fn teardown(&mut self) {
        self.search.cancel();
        self.generation += 1;
        self.in_flight = None;
    }

    // ============ Derived state ============

    pub fn config(&self) -> &CatalogueConfig {
        &self.config
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn items(&self) -> &[GameSummary] {
        &self.items
    }

    /// Server-reported total, once the first page has arrived
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn page_count(&self) -> Option<u32> {
        let page_size = u64::from(self.config.page_size.max(1));
        self.total.map(|total| total.div_ceil(page_size) as u32)
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_filter_count()
    }

    /// Everything matching the filters has been loaded (or is on screen)
    pub fn is_complete(&self) -> bool {
        let Some(total) = self.total else {
            return false;
        };
        match self.config.paging_mode {
            PagingMode::InfiniteScroll => self.exhausted || self.items.len() as u64 >= total,
            PagingMode::Paged => self.page >= self.page_count().unwrap_or(0),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// First page of a fetch cycle in flight with nothing to show yet
    pub fn is_loading_initial(&self) -> bool {
        self.in_flight.is_some() && self.items.is_empty()
    }

    /// A follow-up infinite-scroll page is in flight
    pub fn is_loading_more(&self) -> bool {
        self.config.paging_mode == PagingMode::InfiniteScroll
            && self.in_flight.is_some_and(|f| f.page > 1)
    }

    /// The search succeeded but matched nothing
    pub fn is_empty_result(&self) -> bool {
        self.total == Some(0) && self.in_flight.is_none()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_pending_search(&self) -> bool {
        self.search.is_pending()
    }

    /// Minimal query string describing the current view, for the address bar
    pub fn canonical_query_string(&self) -> String {
        let url_page = match self.config.paging_mode {
            PagingMode::Paged => self.page,
            PagingMode::InfiniteScroll => 1,
        };
        self.filters
            .to_query_string(url_page, self.config.default_sort, self.config.recently_added_days)
    }

    // ============ Internals ============

    fn filters_changed(&mut self) -> PageRequest {
        self.generation += 1;
        self.page = 1;
        self.reset_results();
        tracing::debug!(
            "Filters changed (generation {}, {} active)",
            self.generation,
            self.filters.active_filter_count()
        );
        self.issue(1)
    }

    fn reset_results(&mut self) {
        self.items.clear();
        self.seen.clear();
        self.total = None;
        self.error = None;
        self.failed_page = None;
        self.exhausted = false;
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        self.in_flight = Some(InFlight {
            generation: self.generation,
            page,
        });
        let query = Query::from_filters(
            &self.filters,
            page,
            self.config.page_size,
            self.config.recently_added_days,
        );
        tracing::debug!("Requesting page {} ({})", page, query.to_query_string());
        PageRequest {
            generation: self.generation,
            page,
            query,
        }
    }

    fn merge(&mut self, incoming: Vec<GameSummary>) -> usize {
        let before = self.items.len();
        for game in incoming {
            if self.seen.insert(game.id) {
                self.items.push(game);
            }
        }
        self.items.len() - before
    }

    fn replace(&mut self, incoming: Vec<GameSummary>) -> usize {
        self.seen = incoming.iter().map(|g| g.id).collect();
        self.items = incoming;
        self.items.len()
    }
}
