use leptos::prelude::*;

use crate::api::frontend_config;
use crate::components::Catalogue;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="app-container">
            <Catalogue config=frontend_config() />
            <footer class="app-footer">
                {format!("Build {} ({})", env!("BUILD_HASH"), env!("BUILD_TIMESTAMP"))}
            </footer>
        </div>
    }
}
