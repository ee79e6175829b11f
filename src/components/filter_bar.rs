use leptos::prelude::*;

use ludoteca_core::SortKey;

use super::catalogue::CatalogueHandle;

/// Largest player count offered in the players dropdown
const MAX_PLAYER_OPTION: u32 = 8;

#[component]
pub fn FilterBar(handle: CatalogueHandle) -> impl IntoView {
    let controller = handle.controller;
    let search_text = move || controller.with(|c| c.filters().search_text.clone());
    let designer = move || controller.with(|c| c.filters().designer.clone());
    let players = move || {
        controller.with(|c| c.filters().player_count.map(|n| n.to_string()).unwrap_or_default())
    };
    let sort = move || controller.with(|c| c.filters().sort.as_str());
    let filter_count = move || controller.with(|c| c.active_filter_count());

    view! {
        <div class="filter-bar">
            <div class="search-box">
                <input
                    type="text"
                    placeholder="Search games..."
                    prop:value=search_text
                    on:input=move |ev| handle.set_search_text(event_target_value(&ev))
                />
                <Show when=move || !search_text().is_empty()>
                    <button
                        class="search-clear"
                        on:click=move |_| handle.set_search_text(String::new())
                        title="Clear search"
                    >
                        "×"
                    </button>
                </Show>
            </div>
            <input
                type="text"
                class="designer-filter"
                placeholder="Designer"
                prop:value=designer
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    handle.change(|c| c.set_designer(value.trim()));
                }
            />
            <select
                class="players-filter"
                prop:value=players
                on:change=move |ev| {
                    let players = event_target_value(&ev).parse::<u32>().ok();
                    handle.change(|c| c.set_player_count(players));
                }
            >
                <option value="">"Any players"</option>
                {(1..=MAX_PLAYER_OPTION).map(|n| view! {
                    <option value=n.to_string()>{format!("{} players", n)}</option>
                }).collect::<Vec<_>>()}
            </select>
            <label class="toggle">
                <input
                    type="checkbox"
                    prop:checked=move || controller.with(|c| c.filters().nz_designer_only)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        handle.change(|c| c.set_nz_designer_only(checked));
                    }
                />
                "NZ designers"
            </label>
            <label class="toggle">
                <input
                    type="checkbox"
                    prop:checked=move || controller.with(|c| c.filters().recently_added_only)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        handle.change(|c| c.set_recently_added_only(checked));
                    }
                />
                "Recently added"
            </label>
            <select
                class="sort-dropdown"
                prop:value=sort
                on:change=move |ev| {
                    if let Ok(key) = event_target_value(&ev).parse::<SortKey>() {
                        handle.change(|c| c.set_sort(key));
                    }
                }
            >
                <For
                    each=move || SortKey::all().iter().copied()
                    key=|key| key.as_str()
                    children=move |key| {
                        view! {
                            <option value=key.as_str()>{key.label()}</option>
                        }
                    }
                />
            </select>
            <Show when=move || { filter_count() > 0 }>
                <button
                    class="clear-filters"
                    on:click=move |_| handle.change(|c| c.clear_all_filters())
                >
                    {move || format!("Clear filters ({})", filter_count())}
                </button>
            </Show>
        </div>
    }
}
