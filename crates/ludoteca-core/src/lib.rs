//! Ludoteca Core - Catalogue state, query derivation and Games API access
//!
//! Everything here is platform independent. The browser frontend and the
//! CLI both drive the same [`CatalogueController`]; they only differ in how
//! they perform HTTP requests and wait out the search debounce window.

pub mod api;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod model;
pub mod query;
pub mod scroll;
pub mod session;

pub use api::GamesApi;
#[cfg(feature = "http")]
pub use api::http::HttpGamesApi;
pub use config::{CatalogueConfig, PagingMode};
pub use controller::{CatalogueController, PageOutcome, PageRequest};
pub use debounce::{DebounceTicket, Debouncer};
pub use error::{CatalogueError, Result};
pub use model::{CategoryCounts, GameId, GameSummary, ResultPage, category_label};
pub use query::{ALL_CATEGORIES, FilterState, Query, SortKey};
pub use scroll::{FrameCoalescer, HeaderVisibility, ScrollTracker};
pub use session::CatalogueSession;
