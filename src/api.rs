//! Games API bindings for the browser
//!
//! Requests go through `window.fetch`; the catalogue logic itself lives in
//! `ludoteca-core` and only sees the [`GamesApi`] trait.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, console};

use ludoteca_core::api::{CATEGORY_COUNTS_PATH, GAMES_PATH, endpoint_url};
use ludoteca_core::{CatalogueConfig, CatalogueError, CategoryCounts, GamesApi, PagingMode, Query, ResultPage};

/// The Games API base URL, fixed at build time
const API_BASE: &str = match option_env!("LUDOTECA_API_BASE") {
    Some(base) => base,
    None => "http://127.0.0.1:3001",
};

/// Catalogue settings for the browser build.
///
/// Building with `LUDOTECA_PAGING=paged` selects the numbered-pager preset.
pub fn frontend_config() -> CatalogueConfig {
    let mut config = match option_env!("LUDOTECA_PAGING") {
        Some("paged") => CatalogueConfig::paged(),
        _ => CatalogueConfig::default(),
    };
    config.api_base_url = API_BASE.to_string();
    if config.paging_mode == PagingMode::Paged {
        console::log_1(&"Catalogue using numbered pages".into());
    }
    config
}

/// [`GamesApi`] over the browser's `fetch`
#[derive(Debug, Clone, Copy)]
pub struct BrowserGamesApi {
    base_url: &'static str,
}

impl Default for BrowserGamesApi {
    fn default() -> Self {
        Self { base_url: API_BASE }
    }
}

fn js_error(context: &str, err: wasm_bindgen::JsValue) -> CatalogueError {
    let message = format!("{}: {:?}", context, err);
    console::error_1(&message.clone().into());
    CatalogueError::Transport(message)
}

async fn http_get<T: DeserializeOwned>(url: &str) -> Result<T, CatalogueError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    console::log_1(&format!("http_get: Fetching {}", url).into());
    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| js_error("Request creation failed", e))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| js_error("Setting headers failed", e))?;

    let window = web_sys::window().ok_or_else(|| CatalogueError::Transport("No window".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| js_error("Fetch failed", e))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| js_error("Unexpected fetch result", e))?;

    let text_promise = resp.text().map_err(|e| js_error("Reading body failed", e))?;
    let body = JsFuture::from(text_promise)
        .await
        .map_err(|e| js_error("Reading body failed", e))?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        let status = resp.status();
        console::error_1(&format!("http_get: Response status {}", status).into());
        return Err(CatalogueError::Http {
            status,
            message: if body.is_empty() { resp.status_text() } else { body },
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[async_trait(?Send)]
impl GamesApi for BrowserGamesApi {
    async fn fetch_games_page(&self, query: &Query) -> Result<ResultPage, CatalogueError> {
        let url = format!("{}?{}", endpoint_url(self.base_url, GAMES_PATH), query.to_query_string());
        http_get(&url).await
    }

    async fn fetch_category_counts(&self) -> Result<CategoryCounts, CatalogueError> {
        http_get(&endpoint_url(self.base_url, CATEGORY_COUNTS_PATH)).await
    }
}
