//! Address-bar synchronisation for deep links

use wasm_bindgen::JsValue;
use web_sys::console;

/// Current `location.search` without the leading `?`
pub fn current_query_string() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .map(|s| s.trim_start_matches('?').to_string())
        .unwrap_or_default()
}

/// Path plus query for a canonical query string
pub fn href_for(pathname: &str, query_string: &str) -> String {
    if query_string.is_empty() {
        pathname.to_string()
    } else {
        format!("{}?{}", pathname, query_string)
    }
}

/// Rewrite the address bar in place, without adding a history entry.
/// Does nothing when the URL already matches.
pub fn replace_query_string(query_string: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    if current_query_string() == query_string {
        return;
    }

    let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
    let href = href_for(&pathname, query_string);
    let result = window
        .history()
        .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&href)));
    if let Err(e) = result {
        console::error_1(&format!("Failed to update URL: {:?}", e).into());
    }
}
