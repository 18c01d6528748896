use viewer_core::ViewerConfig;
use web_sys::window;

/// Id of the optional `<script type="application/json">` element holding
/// viewer overrides.
pub const CONFIG_ELEMENT_ID: &str = "viewer-config";

pub fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub fn page_config() -> ViewerConfig {
    let Some(raw) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
    else {
        return ViewerConfig::default();
    };

    match ViewerConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring page viewer config");
            ViewerConfig::default()
        }
    }
}
