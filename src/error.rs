use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("window unavailable")]
    MissingWindow,
    #[error("document unavailable")]
    MissingDocument,
    #[error("element {0} not found")]
    MissingElement(String),
    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for ViewerError {
    fn from(error: JsValue) -> Self {
        ViewerError::Js(js_err(error))
    }
}

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Some(error) = error.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}
