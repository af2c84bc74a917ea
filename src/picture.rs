use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, DomParser, Element, SupportedType};

use bomviewer_core::markup::{self, RELOAD_BUTTON_ATTR};
use bomviewer_core::{
    reconcile, Completion, PictureChoice, PictureFlow, Reconciliation, RefreshError,
    SubmitTicket, ViewerConfig,
};

use crate::client::PageClient;
use crate::error::js_err;
use crate::modal;

/// Drives the chooser dialog and the submit/refresh round trip for the
/// profile picture section.
pub struct ProfilePictureController {
    document: Document,
    config: ViewerConfig,
    client: Rc<dyn PageClient>,
    reload: Rc<dyn Fn()>,
    flow: RefCell<PictureFlow>,
    reload_listener: RefCell<Option<EventListener>>,
}

impl ProfilePictureController {
    pub fn new(
        document: Document,
        config: ViewerConfig,
        client: Rc<dyn PageClient>,
        reload: Rc<dyn Fn()>,
    ) -> Rc<Self> {
        Rc::new(Self {
            document,
            config,
            client,
            reload,
            flow: RefCell::new(PictureFlow::new()),
            reload_listener: RefCell::new(None),
        })
    }

    pub fn flow(&self) -> PictureFlow {
        self.flow.borrow().clone()
    }

    pub fn open_chooser(&self) {
        if let Err(err) = self.flow.borrow_mut().open_chooser() {
            console::warn!("profile picture chooser not opened", err.to_string());
            return;
        }
        if let Some(chooser) = self.document.get_element_by_id(&self.config.chooser_modal_id) {
            modal::show(&chooser);
        }
    }

    pub fn choose(self: &Rc<Self>, choice: PictureChoice) {
        console::log!(
            "setting profile picture",
            choice.entity_type.clone(),
            choice.entity_id.clone(),
            choice.file_id.clone()
        );
        let ticket = match self.flow.borrow_mut().begin_submit(choice.clone()) {
            Ok(ticket) => ticket,
            Err(err) => {
                console::warn!("profile picture choice ignored", err.to_string());
                return;
            }
        };
        if let Some(chooser) = self.document.get_element_by_id(&self.config.chooser_modal_id) {
            modal::hide(&chooser);
        }
        let section = self.document.get_element_by_id(&self.config.section_id);
        if let Some(section) = section.as_ref() {
            section.set_inner_html(&markup::loading(&self.config.labels));
        }
        let controller = Rc::clone(self);
        spawn_local(async move {
            controller.run(ticket, choice, section).await;
        });
    }

    async fn run(&self, ticket: SubmitTicket, choice: PictureChoice, section: Option<Element>) {
        let completion = match self.submit(&choice, section.is_some()).await {
            Ok(reconciliation) => {
                if let (Reconciliation::Replace(inner), Some(section)) = (&reconciliation, &section) {
                    section.set_inner_html(inner);
                }
                Completion::from(&reconciliation)
            }
            Err(err) => {
                console::error!("error setting profile picture", err.to_string());
                if let Some(section) = section.as_ref() {
                    self.show_error(section);
                }
                Completion::Failed
            }
        };
        if let Err(err) = self.flow.borrow_mut().complete(ticket, completion) {
            console::warn!("profile picture completion dropped", err.to_string());
            return;
        }
        if completion == Completion::ReloadFallback {
            console::log!("profile picture section not found, reloading page");
            (self.reload)();
        }
    }

    async fn submit(
        &self,
        choice: &PictureChoice,
        live_section: bool,
    ) -> Result<Reconciliation, RefreshError> {
        self.client.post(&choice.submit_path()).await?;
        let html = self.client.get_html(&choice.entity_path()).await?;
        let fetched = extract_inner_html(&html, &self.config.section_id)?;
        Ok(reconcile(fetched, live_section))
    }

    fn show_error(&self, section: &Element) {
        section.set_inner_html(&markup::submit_error(&self.config.labels));
        let button = match section.query_selector(&format!("[{RELOAD_BUTTON_ATTR}]")) {
            Ok(Some(button)) => button,
            _ => return,
        };
        let reload = self.reload.clone();
        let listener = EventListener::new(&button, "click", move |_event| reload());
        *self.reload_listener.borrow_mut() = Some(listener);
    }
}

/// Parses a full page and returns the inner markup of the element with `id`.
fn extract_inner_html(html: &str, id: &str) -> Result<Option<String>, RefreshError> {
    let parser = DomParser::new().map_err(|err| RefreshError::Parse(js_err(err)))?;
    let parsed = parser
        .parse_from_string(html, SupportedType::TextHtml)
        .map_err(|err| RefreshError::Parse(js_err(err)))?;
    Ok(parsed.get_element_by_id(id).map(|element| element.inner_html()))
}
