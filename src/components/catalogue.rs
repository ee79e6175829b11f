//! The catalogue page: wires the controller to the network, the timers and
//! the address bar

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::console;

use ludoteca_core::{CatalogueConfig, CatalogueController, CategoryCounts, GamesApi, PageRequest, PagingMode};

use super::{CategorySidebar, FilterBar, GameGrid, InfiniteScrollSentinel, Pager, SiteHeader};
use crate::api::BrowserGamesApi;
use crate::url_state;

/// Shared handle to the catalogue state.
///
/// Every mutation goes through the controller; any page request it hands
/// back is fetched here and folded in with `complete`, which discards
/// responses from superseded filters.
#[derive(Clone, Copy)]
pub struct CatalogueHandle {
    pub controller: RwSignal<CatalogueController>,
    pub counts: RwSignal<Option<CategoryCounts>>,
    api: BrowserGamesApi,
}

impl CatalogueHandle {
    fn new(controller: CatalogueController) -> Self {
        Self {
            controller: RwSignal::new(controller),
            counts: RwSignal::new(None),
            api: BrowserGamesApi::default(),
        }
    }

    fn dispatch(self, request: PageRequest) {
        spawn_local(async move {
            let result = self.api.fetch_games_page(&request.query).await;
            if let Err(e) = &result {
                console::error_1(&format!("Failed to load games page {}: {}", request.page, e).into());
            }
            // Signal gone means the page was torn down
            let _ = self.controller.try_update(|c| c.complete(&request, result));
        });
    }

    /// Apply a filter change and fetch the fresh first page
    pub fn change(self, f: impl FnOnce(&mut CatalogueController) -> PageRequest) {
        if let Some(request) = self.controller.try_update(f) {
            self.dispatch(request);
        }
    }

    /// Like [`change`](Self::change), for operations that may decline to fetch
    pub fn maybe_change(self, f: impl FnOnce(&mut CatalogueController) -> Option<PageRequest>) {
        if let Some(Some(request)) = self.controller.try_update(f) {
            self.dispatch(request);
        }
    }

    /// Record a keystroke; the search runs once typing pauses
    pub fn set_search_text(self, text: String) {
        let Some(ticket) = self.controller.try_update(|c| c.set_search_text(text)) else {
            return;
        };
        let delay = self
            .controller
            .with_untracked(|c| c.config().search_debounce().as_millis() as u32);

        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            self.maybe_change(|c| c.commit_search(ticket));
        });
    }

    pub fn load_next_page(self) {
        self.maybe_change(|c| c.load_next_page());
    }

    pub fn go_to_page(self, page: u32) {
        self.maybe_change(|c| c.go_to_page(page));
        window().scroll_to_with_x_and_y(0.0, 0.0);
    }

    pub fn retry(self) {
        self.maybe_change(|c| c.retry());
    }

    fn load_category_counts(self) {
        spawn_local(async move {
            match self.api.fetch_category_counts().await {
                Ok(counts) => {
                    let _ = self.counts.try_set(Some(counts));
                }
                Err(e) => console::error_1(&format!("Failed to load category counts: {}", e).into()),
            }
        });
    }
}

#[component]
pub fn Catalogue(config: CatalogueConfig) -> impl IntoView {
    let query_string = url_state::current_query_string();
    let paged = config.paging_mode == PagingMode::Paged;
    let handle = CatalogueHandle::new(CatalogueController::from_query_string(config, &query_string));

    handle.change(|c| c.start());
    handle.load_category_counts();

    // Keep the address bar on the canonical form of the current view
    Effect::new(move || {
        let query_string = handle.controller.with(|c| c.canonical_query_string());
        url_state::replace_query_string(&query_string);
    });

    // Sentinel in view and nothing blocking: fetch the next page. Re-runs
    // after every merge, so a sentinel that stays on screen keeps loading.
    let sentinel_visible = RwSignal::new(false);
    Effect::new(move || {
        if !sentinel_visible.get() {
            return;
        }
        let ready = handle.controller.with(|c| {
            c.total().is_some() && !c.is_loading() && !c.is_complete() && c.error().is_none()
        });
        if ready {
            handle.load_next_page();
        }
    });

    on_cleanup(move || {
        let _ = handle.controller.try_update(|c| c.teardown());
    });

    let sentinel_enabled = Signal::derive(move || {
        handle.controller.with(|c| c.total().is_some() && !c.is_complete() && c.error().is_none())
    });

    view! {
        <SiteHeader handle=handle />
        <div class="main-content">
            <CategorySidebar handle=handle />
            <main class="game-content">
                <FilterBar handle=handle />
                <GameGrid handle=handle />
                {if paged {
                    view! { <Pager handle=handle /> }.into_any()
                } else {
                    view! { <InfiniteScrollSentinel enabled=sentinel_enabled visible=sentinel_visible /> }.into_any()
                }}
            </main>
        </div>
    }
}
