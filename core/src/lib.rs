pub mod config;
pub mod dispatch;
pub mod error;
pub mod marker;
pub mod markup;
pub mod picture;
pub mod preview;

pub use config::{Labels, ViewerConfig};
pub use dispatch::{DispatchTable, Dispatched, Propagation};
pub use error::{ConfigError, FlowError, MarkerError, RefreshError, RequestStage};
pub use marker::{find_marked, Action, ActionKind, MarkerTarget};
pub use picture::{
    reconcile, Completion, FlowPhase, PictureChoice, PictureFlow, Reconciliation, SectionState,
    SubmitTicket,
};
pub use preview::{download_href, ImageRef, PreviewContent};
