//! HTML rendered into the page by the controllers. Bootstrap class names
//! match the server templates.

use std::fmt::Write;

use crate::config::Labels;

pub const MODAL_IMAGE_ID: &str = "modalImage";
pub const MODAL_DOWNLOAD_ID: &str = "downloadLink";
pub const MODAL_LABEL_ID: &str = "imageModalLabel";
pub const RELOAD_BUTTON_ATTR: &str = "data-page-reload";

/// Inner markup of the image preview dialog root.
pub fn image_modal(labels: &Labels) -> String {
    let mut out = String::new();
    out.push_str(r#"<div class="modal-dialog modal-xl modal-dialog-centered"><div class="modal-content">"#);
    out.push_str(r#"<div class="modal-header">"#);
    let _ = write!(
        out,
        r#"<h5 class="modal-title" id="{MODAL_LABEL_ID}">{}</h5>"#,
        escape(&labels.preview_title)
    );
    let _ = write!(
        out,
        r#"<button type="button" class="btn-close" data-bs-dismiss="modal" aria-label="{}"></button>"#,
        escape(&labels.close)
    );
    out.push_str("</div>");
    let _ = write!(
        out,
        r#"<div class="modal-body text-center"><img id="{MODAL_IMAGE_ID}" src="" class="img-fluid" alt="" style="max-height: 80vh;"></div>"#
    );
    out.push_str(r#"<div class="modal-footer">"#);
    let _ = write!(
        out,
        r##"<a id="{MODAL_DOWNLOAD_ID}" href="#" class="btn btn-primary" download><i class="fas fa-download"></i> {}</a>"##,
        escape(&labels.download)
    );
    let _ = write!(
        out,
        r#"<button type="button" class="btn btn-secondary" data-bs-dismiss="modal">{}</button>"#,
        escape(&labels.close)
    );
    out.push_str("</div></div></div>");
    out
}

pub fn loading(labels: &Labels) -> String {
    format!(
        r#"<div class="text-center"><div class="spinner-border" role="status"><span class="visually-hidden">{}</span></div><p class="mt-2">{}</p></div>"#,
        escape(&labels.loading),
        escape(&labels.submitting)
    )
}

/// Inline error with a button the controller wires to a page reload.
pub fn submit_error(labels: &Labels) -> String {
    format!(
        r#"<div class="alert alert-danger">{} <button type="button" {RELOAD_BUTTON_ATTR} class="btn btn-sm btn-outline-secondary ms-2">{}</button></div>"#,
        escape(&labels.error),
        escape(&labels.refresh)
    )
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
