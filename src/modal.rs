//! Shows and hides dialogs through Bootstrap's `Modal` when the page loads
//! it, with a plain class/style toggle otherwise.

use gloo::console;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::error::js_err;

mod bootstrap {
    use wasm_bindgen::prelude::*;
    use web_sys::Element;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = bootstrap)]
        pub type Modal;

        #[wasm_bindgen(catch, static_method_of = Modal, js_namespace = bootstrap, js_name = getOrCreateInstance)]
        pub fn get_or_create_instance(element: &Element) -> Result<Modal, JsValue>;

        #[wasm_bindgen(catch, static_method_of = Modal, js_namespace = bootstrap, js_name = getInstance)]
        pub fn get_instance(element: &Element) -> Result<Option<Modal>, JsValue>;

        #[wasm_bindgen(method)]
        pub fn show(this: &Modal);

        #[wasm_bindgen(method)]
        pub fn hide(this: &Modal);
    }
}

pub(crate) fn show(element: &Element) {
    match bootstrap::Modal::get_or_create_instance(element) {
        Ok(modal) => modal.show(),
        Err(_) => fallback_toggle(element, true),
    }
}

pub(crate) fn hide(element: &Element) {
    match bootstrap::Modal::get_instance(element) {
        Ok(Some(modal)) => modal.hide(),
        // Never shown through Bootstrap.
        Ok(None) => {}
        Err(_) => fallback_toggle(element, false),
    }
}

fn fallback_toggle(element: &Element, visible: bool) {
    let classes = element.class_list();
    let toggled = if visible {
        classes.add_1("show")
    } else {
        classes.remove_1("show")
    };
    if let Err(err) = toggled {
        console::warn!("modal class toggle failed", js_err(err));
    }
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let display = if visible { "block" } else { "none" };
        if let Err(err) = html.style().set_property("display", display) {
            console::warn!("modal display toggle failed", js_err(err));
        }
    }
    let aria = if visible {
        element.remove_attribute("aria-hidden")
    } else {
        element.set_attribute("aria-hidden", "true")
    };
    if let Err(err) = aria {
        console::warn!("modal aria-hidden toggle failed", js_err(err));
    }
}
