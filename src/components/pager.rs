use leptos::prelude::*;

use super::catalogue::CatalogueHandle;

/// Page links shown either side of the current page
const PAGE_WINDOW: u32 = 2;

/// Page numbers to render, `None` marking an elided run
fn page_links(current: u32, page_count: u32) -> Vec<Option<u32>> {
    let mut links = Vec::new();
    let mut last = 0;
    for page in 1..=page_count {
        let near = page.abs_diff(current) <= PAGE_WINDOW;
        if page == 1 || page == page_count || near {
            if page > last + 1 {
                links.push(None);
            }
            links.push(Some(page));
            last = page;
        }
    }
    links
}

/// Numbered pager for the paged catalogue mode
#[component]
pub fn Pager(handle: CatalogueHandle) -> impl IntoView {
    let controller = handle.controller;
    let current = move || controller.with(|c| c.page());
    let page_count = move || controller.with(|c| c.page_count().unwrap_or(0));

    view! {
        <Show when=move || { page_count() > 1 }>
            <nav class="pager">
                <button
                    class="pager-btn"
                    disabled=move || current() <= 1
                    on:click=move |_| handle.go_to_page(current().saturating_sub(1))
                >
                    "Previous"
                </button>
                {move || page_links(current(), page_count()).into_iter().map(|link| match link {
                    Some(page) => view! {
                        <button
                            class="pager-btn"
                            class:active=move || current() == page
                            on:click=move |_| handle.go_to_page(page)
                        >
                            {page}
                        </button>
                    }.into_any(),
                    None => view! { <span class="pager-gap">"…"</span> }.into_any(),
                }).collect::<Vec<_>>()}
                <button
                    class="pager-btn"
                    disabled=move || current() >= page_count()
                    on:click=move |_| handle.go_to_page(current() + 1)
                >
                    "Next"
                </button>
            </nav>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_links_short() {
        assert_eq!(page_links(1, 3), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_page_links_elide_far_pages() {
        assert_eq!(
            page_links(6, 12),
            vec![Some(1), None, Some(4), Some(5), Some(6), Some(7), Some(8), None, Some(12)]
        );
        assert_eq!(page_links(1, 10), vec![Some(1), Some(2), Some(3), None, Some(10)]);
    }
}
