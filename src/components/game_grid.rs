//! Game grid with loading, empty and error states

use leptos::prelude::*;

use ludoteca_core::{GameSummary, PagingMode, category_label};

use super::catalogue::CatalogueHandle;

#[component]
pub fn GameGrid(handle: CatalogueHandle) -> impl IntoView {
    let controller = handle.controller;
    let games = move || controller.with(|c| c.items().to_vec());
    let infinite = controller.with_untracked(|c| c.config().paging_mode == PagingMode::InfiniteScroll);
    let page_size = controller.with_untracked(|c| c.config().page_size);

    // Which of the four views to show; only re-renders when that changes
    let status = Memo::new(move |_| {
        controller.with(|c| {
            let blocking_error = c.error().filter(|_| c.items().is_empty()).map(str::to_string);
            (blocking_error, c.is_loading_initial(), c.is_empty_result())
        })
    });

    view! {
        {move || {
            let (blocking_error, loading_initial, empty_result) = status.get();

            if let Some(message) = blocking_error {
                view! {
                    <div class="error-state">
                        <p>"Couldn't load games."</p>
                        <p class="error-detail">{message}</p>
                        <button class="retry-btn" on:click=move |_| handle.retry()>"Retry"</button>
                    </div>
                }.into_any()
            } else if loading_initial {
                view! {
                    <div class="game-grid">
                        {(0..page_size).map(|_| view! { <SkeletonCard /> }).collect::<Vec<_>>()}
                    </div>
                }.into_any()
            } else if empty_result {
                let filtered = controller.with_untracked(|c| c.active_filter_count() > 0);
                view! {
                    <div class="empty-state">
                        <p>"No games match these filters."</p>
                        {filtered.then(|| view! {
                            <button
                                class="clear-filters"
                                on:click=move |_| handle.change(|c| c.clear_all_filters())
                            >
                                "Clear filters"
                            </button>
                        })}
                    </div>
                }.into_any()
            } else {
                view! {
                    <div
                        class="game-grid"
                        class:refreshing=move || controller.with(|c| c.is_loading() && !c.is_loading_more())
                    >
                        <For
                            each=games
                            key=|game| game.id
                            children=move |game| view! { <GameCard game=game /> }
                        />
                    </div>
                    // Loading indicator at bottom
                    {move || controller.with(|c| c.is_loading_more()).then(|| view! {
                        <div class="loading-more">"Loading more..."</div>
                    })}
                    {move || controller.with(|c| c.error().map(str::to_string)).map(|message| view! {
                        <div class="load-error">
                            <span>{message}</span>
                            <button class="retry-btn" on:click=move |_| handle.retry()>"Retry"</button>
                        </div>
                    })}
                    // Game count
                    <div class="game-count">
                        {move || controller.with(|c| {
                            let total = c.total().unwrap_or(0);
                            if infinite && c.is_complete() && total > 0 {
                                format!("All {} games shown", c.items().len())
                            } else if infinite {
                                format!("{} of {} games", c.items().len(), total)
                            } else {
                                format!("{} games", total)
                            }
                        })}
                    </div>
                }.into_any()
            }
        }}
    }
}

#[component]
fn SkeletonCard() -> impl IntoView {
    view! {
        <div class="game-card skeleton" aria-hidden="true">
            <div class="game-cover"></div>
            <div class="game-info">
                <div class="skeleton-line"></div>
                <div class="skeleton-line short"></div>
            </div>
        </div>
    }
}

#[component]
fn GameCard(game: GameSummary) -> impl IntoView {
    let title = game.title.clone();
    let first_char = game.title.chars().next().unwrap_or('?').to_string();
    let players = game.player_range();
    let designers = (!game.designers.is_empty()).then(|| game.designers.join(", "));
    let category = game.category.as_deref().map(category_label);
    let added = game.date_added.map(|d| format!("Added {}", d.format("%Y-%m-%d")));

    view! {
        <div class="game-card">
            <div class="game-cover">
                {match game.image_url {
                    Some(url) => view! {
                        <img
                            src=url
                            alt=title.clone()
                            class="cover-image"
                            loading="lazy"
                        />
                    }.into_any(),
                    None => view! {
                        <div class="cover-placeholder">{first_char}</div>
                    }.into_any(),
                }}
                {game.nz_designer.then(|| view! {
                    <span class="nz-badge" title="New Zealand designer">"NZ"</span>
                })}
            </div>
            <div class="game-info">
                <h3 class="game-title">{title}</h3>
                {designers.map(|d| view! { <p class="game-designer">{d}</p> })}
                <p class="game-meta">
                    {game.year_published.map(|y| view! { <span class="game-year">{y}</span> })}
                    {players.map(|p| view! { <span class="game-players">{format!("{} players", p)}</span> })}
                    {game.playing_time.map(|t| view! { <span class="game-time">{format!("{} min", t)}</span> })}
                    {game.average_rating.map(|r| view! { <span class="game-rating">{format!("{:.1}", r)}</span> })}
                </p>
                {category.map(|c| view! { <span class="game-category">{c}</span> })}
                {added.map(|a| view! { <span class="game-added">{a}</span> })}
            </div>
        </div>
    }
}
