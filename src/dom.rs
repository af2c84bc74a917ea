use gloo::console;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, Node};

use bomviewer_core::MarkerTarget;

use crate::error::{js_err, ViewerError};

#[derive(Clone, Debug)]
pub struct DomTarget(pub Element);

impl MarkerTarget for DomTarget {
    fn has_attribute(&self, name: &str) -> bool {
        self.0.has_attribute(name)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(DomTarget)
    }
}

/// Element a click landed on; text node targets resolve to their parent.
pub(crate) fn event_element(event: &Event) -> Option<Element> {
    let target = event.target()?;
    if let Some(element) = target.dyn_ref::<Element>() {
        return Some(element.clone());
    }
    target.dyn_into::<Node>().ok()?.parent_element()
}

pub fn document() -> Result<Document, ViewerError> {
    let window = web_sys::window().ok_or(ViewerError::MissingWindow)?;
    window.document().ok_or(ViewerError::MissingDocument)
}

pub fn reload_page() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.location().reload() {
        console::error!("page reload failed", js_err(err));
    }
}
