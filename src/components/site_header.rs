//! Sticky site header that hides on scroll-down and returns on scroll-up

use leptos::ev;
use leptos::html;
use leptos::prelude::*;

use ludoteca_core::ScrollTracker;

use super::catalogue::CatalogueHandle;

#[component]
pub fn SiteHeader(handle: CatalogueHandle) -> impl IntoView {
    let header_ref = NodeRef::<html::Header>::new();
    let tracker = RwSignal::new(ScrollTracker::default());

    // At most one sample per animation frame
    let on_frame = move || {
        let y = window().scroll_y().unwrap_or(0.0);
        let height = header_ref
            .get_untracked()
            .map(|el| f64::from(el.offset_height()))
            .unwrap_or(0.0);
        let loading_more = handle
            .controller
            .try_with_untracked(|c| c.is_loading_more())
            .unwrap_or(false);
        let _ = tracker.try_update(|t| t.on_frame(y, height, loading_more));
    };

    let listener = window_event_listener(ev::scroll, move |_| {
        if tracker.try_update_untracked(|t| t.on_scroll()) == Some(true) {
            request_animation_frame(on_frame);
        }
    });
    on_cleanup(move || listener.remove());

    let visible = move || tracker.with(|t| t.header.header_visible);
    let sticky = move || tracker.with(|t| t.header.is_sticky);
    let filter_count = move || handle.controller.with(|c| c.active_filter_count());

    view! {
        <header
            class="site-header"
            node_ref=header_ref
            class:header-hidden=move || !visible()
            class:header-sticky=sticky
        >
            <div class="header-left">
                <h1 class="app-title">"Ludoteca"</h1>
            </div>
            <div class="header-right">
                <span class="header-total">
                    {move || handle.controller.with(|c| c.total()).map(|t| format!("{} games", t))}
                </span>
                {move || (filter_count() > 0).then(|| view! {
                    <span class="filter-badge">{format!("{} filters", filter_count())}</span>
                })}
            </div>
        </header>
    }
}
