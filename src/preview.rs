use std::cell::RefCell;

use gloo::console;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlImageElement};

use bomviewer_core::markup::{self, MODAL_DOWNLOAD_ID, MODAL_IMAGE_ID, MODAL_LABEL_ID};
use bomviewer_core::{ImageRef, Labels, PreviewContent, ViewerConfig};

use crate::error::ViewerError;
use crate::modal;

#[derive(Clone)]
struct PreviewDialog {
    root: Element,
    image: HtmlImageElement,
    title: Element,
    download: HtmlAnchorElement,
}

impl PreviewDialog {
    fn bind(root: Element) -> Result<Self, ViewerError> {
        let image = child_by_id(&root, MODAL_IMAGE_ID)?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| ViewerError::MissingElement(format!("img#{MODAL_IMAGE_ID}")))?;
        let title = child_by_id(&root, MODAL_LABEL_ID)?;
        let download = child_by_id(&root, MODAL_DOWNLOAD_ID)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| ViewerError::MissingElement(format!("a#{MODAL_DOWNLOAD_ID}")))?;
        Ok(Self {
            root,
            image,
            title,
            download,
        })
    }

    fn fill(&self, content: &PreviewContent) {
        self.image.set_src(&content.src);
        self.image.set_alt(&content.alt);
        self.title.set_text_content(Some(&content.title));
        self.download.set_href(&content.download_href);
        self.download.set_download(&content.download_name);
    }
}

fn child_by_id(root: &Element, id: &str) -> Result<Element, ViewerError> {
    root.query_selector(&format!("#{id}"))?
        .ok_or_else(|| ViewerError::MissingElement(format!("#{id}")))
}

/// Owns the image preview dialog. The dialog is mounted on the first
/// [`ImagePreview::open`] and reused for the rest of the page's life.
pub struct ImagePreview {
    document: Document,
    modal_id: String,
    labels: Labels,
    dialog: RefCell<Option<PreviewDialog>>,
}

impl ImagePreview {
    pub fn new(document: Document, config: &ViewerConfig) -> Self {
        Self {
            document,
            modal_id: config.image_modal_id.clone(),
            labels: config.labels.clone(),
            dialog: RefCell::new(None),
        }
    }

    pub fn open(&self, image: &ImageRef) -> Result<(), ViewerError> {
        let dialog = self.dialog()?;
        dialog.fill(&PreviewContent::new(image, &self.labels.default_image_name));
        modal::show(&dialog.root);
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.dialog.borrow().is_some()
    }

    fn dialog(&self) -> Result<PreviewDialog, ViewerError> {
        if let Some(dialog) = self.dialog.borrow().as_ref() {
            return Ok(dialog.clone());
        }
        let dialog = PreviewDialog::bind(self.mount()?)?;
        *self.dialog.borrow_mut() = Some(dialog.clone());
        Ok(dialog)
    }

    /// Reuses a server-rendered dialog with the configured id, otherwise
    /// builds one at the end of `<body>`.
    fn mount(&self) -> Result<Element, ViewerError> {
        if let Some(existing) = self.document.get_element_by_id(&self.modal_id) {
            return Ok(existing);
        }
        let root = self.document.create_element("div")?;
        root.set_class_name("modal fade");
        root.set_id(&self.modal_id);
        root.set_attribute("tabindex", "-1")?;
        root.set_inner_html(&markup::image_modal(&self.labels));
        let body = self
            .document
            .body()
            .ok_or_else(|| ViewerError::MissingElement("body".to_string()))?;
        body.append_child(&root)?;
        console::log!("image preview dialog created", self.modal_id.clone());
        Ok(root)
    }
}
