//! Marker attributes written by the server templates and the actions they
//! classify into.

use crate::error::MarkerError;
use crate::picture::PictureChoice;
use crate::preview::ImageRef;

pub const ATTR_IMAGE_VIEW: &str = "data-image-view";
pub const ATTR_IMAGE_SRC: &str = "data-image-src";
pub const ATTR_IMAGE_NAME: &str = "data-image-name";
pub const ATTR_OPEN_CHOOSER: &str = "data-set-profile-picture";
pub const ATTR_PICTURE_CHOICE: &str = "data-profile-picture-choice";
pub const ATTR_ENTITY_ID: &str = "data-entity-id";
pub const ATTR_ENTITY_TYPE: &str = "data-entity-type";
pub const ATTR_FILE_ID: &str = "data-file-id";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    ViewImage,
    OpenChooser,
    ChoosePicture,
}

impl ActionKind {
    /// Dispatch priority: the first kind whose marker matches wins.
    pub const ALL: [ActionKind; 3] = [
        ActionKind::ViewImage,
        ActionKind::OpenChooser,
        ActionKind::ChoosePicture,
    ];

    pub fn marker(self) -> &'static str {
        match self {
            ActionKind::ViewImage => ATTR_IMAGE_VIEW,
            ActionKind::OpenChooser => ATTR_OPEN_CHOOSER,
            ActionKind::ChoosePicture => ATTR_PICTURE_CHOICE,
        }
    }

    /// The chooser button only reacts to clicks landing on the marked element
    /// itself; the other markers also match from descendants.
    pub fn matches_ancestors(self) -> bool {
        !matches!(self, ActionKind::OpenChooser)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ActionKind::ViewImage => 0,
            ActionKind::OpenChooser => 1,
            ActionKind::ChoosePicture => 2,
        }
    }
}

/// Read-only view of a DOM element, enough to classify a click.
pub trait MarkerTarget: Clone {
    fn has_attribute(&self, name: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<String>;
    fn parent(&self) -> Option<Self>;
}

/// Returns the element carrying the marker for `kind`, starting at `target`.
pub fn find_marked<T: MarkerTarget>(target: &T, kind: ActionKind) -> Option<T> {
    let marker = kind.marker();
    if target.has_attribute(marker) {
        return Some(target.clone());
    }
    if !kind.matches_ancestors() {
        return None;
    }
    let mut current = target.parent();
    while let Some(element) = current {
        if element.has_attribute(marker) {
            return Some(element);
        }
        current = element.parent();
    }
    None
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    ViewImage(ImageRef),
    OpenChooser,
    ChoosePicture(PictureChoice),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::ViewImage(_) => ActionKind::ViewImage,
            Action::OpenChooser => ActionKind::OpenChooser,
            Action::ChoosePicture(_) => ActionKind::ChoosePicture,
        }
    }

    /// Extracts the data attributes that accompany the marker for `kind`.
    pub fn read<T: MarkerTarget>(kind: ActionKind, element: &T) -> Result<Action, MarkerError> {
        match kind {
            ActionKind::ViewImage => Ok(Action::ViewImage(ImageRef::new(
                element.attribute(ATTR_IMAGE_SRC),
                element.attribute(ATTR_IMAGE_NAME),
            ))),
            ActionKind::OpenChooser => Ok(Action::OpenChooser),
            ActionKind::ChoosePicture => {
                let required = |attribute: &'static str| {
                    element
                        .attribute(attribute)
                        .ok_or(MarkerError::MissingAttribute { kind, attribute })
                };
                Ok(Action::ChoosePicture(PictureChoice {
                    entity_id: required(ATTR_ENTITY_ID)?,
                    entity_type: required(ATTR_ENTITY_TYPE)?,
                    file_id: required(ATTR_FILE_ID)?,
                }))
            }
        }
    }
}
