use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use web_sys::{Document, Event};

use bomviewer_core::{
    Action, ActionKind, DispatchTable, ImageRef, PictureChoice, Propagation, ViewerConfig,
};

use crate::client::{FetchClient, PageClient};
use crate::dom::{self, DomTarget};
use crate::error::ViewerError;
use crate::globals;
use crate::picture::ProfilePictureController;
use crate::preview::ImagePreview;

thread_local! {
    static INSTALLED: RefCell<Option<Rc<Viewer>>> = RefCell::new(None);
}

/// The page's controllers plus the document click listener routing marked
/// clicks to them. Dropping the viewer removes the listener.
pub struct Viewer {
    preview: Rc<ImagePreview>,
    pictures: Rc<ProfilePictureController>,
    _click: EventListener,
}

impl Viewer {
    pub fn install(document: &Document, config: ViewerConfig) -> Rc<Self> {
        Self::install_with(
            document,
            config,
            Rc::new(FetchClient),
            Rc::new(dom::reload_page),
        )
    }

    pub fn install_with(
        document: &Document,
        config: ViewerConfig,
        client: Rc<dyn PageClient>,
        reload: Rc<dyn Fn()>,
    ) -> Rc<Self> {
        let preview = Rc::new(ImagePreview::new(document.clone(), &config));
        let pictures = ProfilePictureController::new(document.clone(), config, client, reload);
        let table = dispatch_table(preview.clone(), pictures.clone());
        let click = EventListener::new_with_options(
            document,
            "click",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                let Some(target) = dom::event_element(event) else {
                    return;
                };
                let Some(dispatched) = table.dispatch(&DomTarget(target)) else {
                    return;
                };
                event.prevent_default();
                if dispatched.propagation == Propagation::Stop {
                    event.stop_propagation();
                }
                if let Some(err) = dispatched.error {
                    console::warn!("marked element ignored", err.to_string());
                }
            },
        );
        Rc::new(Self {
            preview,
            pictures,
            _click: click,
        })
    }

    pub fn preview(&self) -> &Rc<ImagePreview> {
        &self.preview
    }

    pub fn pictures(&self) -> &Rc<ProfilePictureController> {
        &self.pictures
    }

    pub fn open_image(&self, image: &ImageRef) {
        if let Err(err) = self.preview.open(image) {
            console::error!("image preview failed", err.to_string());
        }
    }

    pub fn open_chooser(&self) {
        self.pictures.open_chooser();
    }

    pub fn set_profile_picture(&self, choice: PictureChoice) {
        self.pictures.choose(choice);
    }

    /// Makes this viewer the target of the `window` entry points
    /// (`openImageModal`, `openSetProfilePictureModal`, `setProfilePicture`).
    pub fn make_global(self: &Rc<Self>) -> Result<(), ViewerError> {
        set_installed(Rc::clone(self));
        globals::expose()
    }
}

/// Detaches the global viewer; the `window` entry points then only warn.
pub fn release_global() {
    INSTALLED.with(|slot| {
        slot.borrow_mut().take();
    });
}

fn dispatch_table(
    preview: Rc<ImagePreview>,
    pictures: Rc<ProfilePictureController>,
) -> DispatchTable {
    let chooser = pictures.clone();
    DispatchTable::new()
        .route(ActionKind::ViewImage, Propagation::Continue, move |action| {
            if let Action::ViewImage(image) = action {
                if let Err(err) = preview.open(&image) {
                    console::error!("image preview failed", err.to_string());
                }
            }
        })
        .route(ActionKind::OpenChooser, Propagation::Continue, move |_action| {
            chooser.open_chooser();
        })
        .route(ActionKind::ChoosePicture, Propagation::Stop, move |action| {
            if let Action::ChoosePicture(choice) = action {
                pictures.choose(choice);
            }
        })
}

fn set_installed(viewer: Rc<Viewer>) {
    INSTALLED.with(|slot| {
        *slot.borrow_mut() = Some(viewer);
    });
}

pub(crate) fn is_installed() -> bool {
    INSTALLED.with(|slot| slot.borrow().is_some())
}

pub(crate) fn with_installed<F: FnOnce(&Viewer)>(action: F) {
    let viewer = INSTALLED.with(|slot| slot.borrow().clone());
    match viewer {
        Some(viewer) => action(&viewer),
        None => {
            console::warn!("image viewer is not initialized");
        }
    }
}
