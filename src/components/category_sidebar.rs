//! Category list with per-category game counts

use leptos::prelude::*;

use ludoteca_core::{ALL_CATEGORIES, category_label};

use super::catalogue::CatalogueHandle;

#[component]
pub fn CategorySidebar(handle: CatalogueHandle) -> impl IntoView {
    // "all" first, then categories in server order; counts may not have arrived yet
    let entries = move || {
        handle.counts.with(|counts| {
            let mut entries = vec![(ALL_CATEGORIES.to_string(), counts.as_ref().map(|c| c.all))];
            if let Some(counts) = counts {
                entries.extend(counts.keys().into_iter().map(|key| (key.to_string(), Some(counts.count(key)))));
            }
            entries
        })
    };
    let selected = move || handle.controller.with(|c| c.filters().category.clone());

    view! {
        <aside class="sidebar">
            <div class="sidebar-section">
                <h2 class="sidebar-title">"Categories"</h2>
                <ul class="category-list">
                    <For
                        each=entries
                        key=|(key, count)| (key.clone(), *count)
                        children=move |(key, count)| {
                            let label = category_label(&key);
                            let key_for_class = key.clone();
                            view! {
                                <li
                                    class="category-item"
                                    class:selected=move || selected() == key_for_class
                                    on:click=move |_| {
                                        let key = key.clone();
                                        handle.change(|c| c.set_category(key));
                                    }
                                >
                                    <span class="category-name">{label}</span>
                                    {count.map(|n| view! { <span class="category-count">{n}</span> })}
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </aside>
    }
}
