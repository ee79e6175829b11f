mod catalogue;
mod category_sidebar;
mod filter_bar;
mod game_grid;
mod infinite_scroll;
mod pager;
mod site_header;

pub use catalogue::Catalogue;
pub use category_sidebar::CategorySidebar;
pub use filter_bar::FilterBar;
pub use game_grid::GameGrid;
pub use infinite_scroll::InfiniteScrollSentinel;
pub use pager::Pager;
pub use site_header::SiteHeader;
