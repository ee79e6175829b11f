//! Invisible sentinel below the grid that reports when it scrolls into view

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, console};

/// Start fetching a little before the sentinel is actually on screen
const ROOT_MARGIN: &str = "0px 0px 200px 0px";

#[component]
pub fn InfiniteScrollSentinel(
    /// Whether more pages can be requested at all
    enabled: Signal<bool>,
    /// Written with the sentinel's current intersection state
    visible: RwSignal<bool>,
) -> impl IntoView {
    let sentinel_ref = NodeRef::<html::Div>::new();

    Effect::new(move || {
        let Some(sentinel) = sentinel_ref.get() else {
            return;
        };

        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let intersecting = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .any(|entry| entry.is_intersecting());
                // The owning view is gone once the signal is disposed
                if visible.try_set(intersecting).is_some() {
                    observer.disconnect();
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_root_margin(ROOT_MARGIN);
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => observer.observe(&sentinel),
            Err(e) => console::error_1(&format!("Failed to create IntersectionObserver: {:?}", e).into()),
        }
        callback.forget();
    });

    view! {
        <div
            class="scroll-sentinel"
            node_ref=sentinel_ref
            class:hidden=move || !enabled.get()
            aria-hidden="true"
        ></div>
    }
}
