use gloo::console;
use js_sys::Reflect;
use wasm_bindgen::JsValue;

use bomviewer_core::ViewerConfig;

/// Optional page-provided config object (or JSON string).
pub(crate) const CONFIG_GLOBAL: &str = "__BOMVIEWER_CONFIG";

pub(crate) fn load_config() -> ViewerConfig {
    let Some(raw) = config_json() else {
        return ViewerConfig::default();
    };
    match ViewerConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            console::warn!("viewer config ignored", err.to_string());
            ViewerConfig::default()
        }
    }
}

fn config_json() -> Option<String> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if value.is_null() || value.is_undefined() {
        return None;
    }
    if let Some(raw) = value.as_string() {
        return Some(raw);
    }
    js_sys::JSON::stringify(&value).ok()?.as_string()
}
