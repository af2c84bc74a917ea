//! Entry points on `window` for inline markup and other scripts.

use js_sys::{Number, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

use bomviewer_core::{ImageRef, PictureChoice};
use gloo::console;

use crate::app;
use crate::error::ViewerError;

pub(crate) fn expose() -> Result<(), ViewerError> {
    let window = web_sys::window().ok_or(ViewerError::MissingWindow)?;

    let open_image = Closure::wrap(Box::new(|src: JsValue, name: JsValue| {
        let image = ImageRef::new(src.as_string(), name.as_string());
        app::with_installed(|viewer| viewer.open_image(&image));
    }) as Box<dyn Fn(JsValue, JsValue)>);
    Reflect::set(&window, &JsValue::from_str("openImageModal"), &open_image.into_js_value())?;

    let open_chooser = Closure::wrap(Box::new(|| {
        app::with_installed(|viewer| viewer.open_chooser());
    }) as Box<dyn Fn()>);
    Reflect::set(
        &window,
        &JsValue::from_str("openSetProfilePictureModal"),
        &open_chooser.into_js_value(),
    )?;

    let set_picture = Closure::wrap(Box::new(
        |entity_id: JsValue, entity_type: JsValue, file_id: JsValue| {
            let (Some(entity_id), Some(entity_type), Some(file_id)) =
                (js_id(&entity_id), js_id(&entity_type), js_id(&file_id))
            else {
                console::warn!("setProfilePicture needs entity id, entity type and file id");
                return;
            };
            let choice = PictureChoice::new(entity_id, entity_type, file_id);
            app::with_installed(|viewer| viewer.set_profile_picture(choice));
        },
    ) as Box<dyn Fn(JsValue, JsValue, JsValue)>);
    Reflect::set(
        &window,
        &JsValue::from_str("setProfilePicture"),
        &set_picture.into_js_value(),
    )?;
    Ok(())
}

/// Ids arrive as strings from data attributes but scripts may pass numbers;
/// those are formatted the way JS `String(n)` does.
fn js_id(value: &JsValue) -> Option<String> {
    if let Some(raw) = value.as_string() {
        return Some(raw);
    }
    let number = value.as_f64()?;
    Number::from(number).to_string(10).ok().map(String::from)
}
