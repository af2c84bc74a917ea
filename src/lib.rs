//! Page glue for the BOM viewer: image preview dialog and profile picture
//! selection, wired to server-rendered `data-*` markers.

pub mod app;
mod boot;
pub mod client;
pub mod dom;
pub mod error;
mod globals;
mod modal;
pub mod picture;
pub mod preview;

use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::prelude::*;

pub use app::{release_global, Viewer};
pub use client::{FetchClient, PageClient};
pub use error::ViewerError;

/// Installs the viewer once the document is parsed. Safe to call repeatedly.
#[wasm_bindgen(js_name = initializeImageViewer)]
pub fn initialize_image_viewer() {
    console_error_panic_hook::set_once();
    let document = match dom::document() {
        Ok(document) => document,
        Err(err) => {
            console::error!("image viewer init failed", err.to_string());
            return;
        }
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_event| install()).forget();
    } else {
        install();
    }
}

fn install() {
    if app::is_installed() {
        return;
    }
    let document = match dom::document() {
        Ok(document) => document,
        Err(err) => {
            console::error!("image viewer init failed", err.to_string());
            return;
        }
    };
    let viewer = Viewer::install(&document, boot::load_config());
    if let Err(err) = viewer.make_global() {
        console::warn!("image viewer globals not exposed", err.to_string());
    }
    console::log!("image viewer ready");
}
