#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures_util::future::{self, FutureExt, LocalBoxFuture};
use gloo::timers::future::TimeoutFuture;
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement};

use bomviewer_core::{Labels, RefreshError, RequestStage, SectionState, ViewerConfig};
use bomviewer_web::{release_global, PageClient, Viewer};

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Default)]
struct FakeClient {
    calls: RefCell<Vec<String>>,
    post_status: Cell<u16>,
    hang_post: Cell<bool>,
    post_error: RefCell<Option<RefreshError>>,
    get_error: RefCell<Option<RefreshError>>,
    page: RefCell<String>,
}

impl FakeClient {
    fn serving(page: &str) -> Rc<Self> {
        let client = Self::default();
        client.post_status.set(200);
        *client.page.borrow_mut() = page.to_string();
        Rc::new(client)
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl PageClient for FakeClient {
    fn post(&self, path: &str) -> LocalBoxFuture<'static, Result<(), RefreshError>> {
        self.calls.borrow_mut().push(format!("POST {path}"));
        if self.hang_post.get() {
            return future::pending().boxed_local();
        }
        if let Some(err) = self.post_error.borrow().clone() {
            return future::ready(Err(err)).boxed_local();
        }
        let status = self.post_status.get();
        async move {
            if (200..300).contains(&status) {
                Ok(())
            } else {
                Err(RefreshError::Status {
                    stage: RequestStage::Submit,
                    status,
                })
            }
        }
        .boxed_local()
    }

    fn get_html(&self, path: &str) -> LocalBoxFuture<'static, Result<String, RefreshError>> {
        self.calls.borrow_mut().push(format!("GET {path}"));
        if let Some(err) = self.get_error.borrow().clone() {
            return future::ready(Err(err)).boxed_local();
        }
        let page = self.page.borrow().clone();
        async move { Ok(page) }.boxed_local()
    }
}

fn document() -> Document {
    web_sys::window()
        .and_then(|window| window.document())
        .expect("document")
}

fn mount(html: &str) -> Element {
    let document = document();
    let host = document.create_element("div").expect("host");
    host.set_inner_html(html);
    document.body().expect("body").append_child(&host).expect("append");
    host
}

fn click(host: &Element, selector: &str) {
    host.query_selector(selector)
        .expect("selector")
        .expect("element")
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

fn config(prefix: &str) -> ViewerConfig {
    ViewerConfig {
        image_modal_id: format!("{prefix}-image"),
        chooser_modal_id: format!("{prefix}-chooser"),
        section_id: format!("{prefix}-section"),
        ..ViewerConfig::default()
    }
}

fn install(prefix: &str, client: Rc<FakeClient>) -> (Rc<Viewer>, Rc<Cell<u32>>) {
    install_with_config(config(prefix), client)
}

fn install_with_config(config: ViewerConfig, client: Rc<FakeClient>) -> (Rc<Viewer>, Rc<Cell<u32>>) {
    let reloads = Rc::new(Cell::new(0u32));
    let counter = reloads.clone();
    let viewer = Viewer::install_with(
        &document(),
        config,
        client,
        Rc::new(move || counter.set(counter.get() + 1)),
    );
    (viewer, reloads)
}

fn assert_error_shown(section: &Element) {
    let html = section.inner_html();
    assert!(html.contains("alert-danger"));
    assert!(html.contains(&Labels::default().error));
    assert!(section.query_selector("[data-page-reload]").unwrap().is_some());
}

fn window_fn(name: &str) -> Function {
    let window = web_sys::window().expect("window");
    Reflect::get(&window, &JsValue::from_str(name))
        .expect("global")
        .dyn_into::<Function>()
        .expect("function")
}

async fn settle() {
    TimeoutFuture::new(20).await;
}

#[wasm_bindgen_test]
fn image_preview_dialog_is_created_once() {
    let client = FakeClient::serving("");
    let (viewer, _reloads) = install("preview", client.clone());
    let host = mount(
        r#"<a href="/files/3" data-image-view data-image-src="/files/preview/3" data-image-name="bolt.png"><img class="thumb-a" src="/files/preview/3"></a>
           <img class="thumb-b" data-image-view data-image-src="/files/9">"#,
    );

    click(&host, ".thumb-a");
    click(&host, ".thumb-b");
    click(&host, ".thumb-a");

    let dialogs = document().query_selector_all("#preview-image").expect("query");
    assert_eq!(dialogs.length(), 1);
    assert!(viewer.preview().is_mounted());

    let dialog = document().get_element_by_id("preview-image").expect("dialog");
    assert!(dialog.class_list().contains("show"));
    let image = dialog.query_selector("#modalImage").unwrap().expect("image");
    assert_eq!(image.get_attribute("src").as_deref(), Some("/files/preview/3"));
    assert_eq!(image.get_attribute("alt").as_deref(), Some("bolt.png"));
    let link = dialog.query_selector("#downloadLink").unwrap().expect("link");
    assert_eq!(link.get_attribute("href").as_deref(), Some("/files/3"));
    assert_eq!(link.get_attribute("download").as_deref(), Some("bolt.png"));
    assert!(client.calls().is_empty());
}

#[wasm_bindgen_test]
fn image_preview_defaults_name_and_keeps_plain_urls() {
    let (viewer, _reloads) = install("plain", FakeClient::serving(""));
    let host = mount(r#"<img class="plain" data-image-view data-image-src="/files/9">"#);

    click(&host, ".plain");

    let dialog = document().get_element_by_id("plain-image").expect("dialog");
    let title = dialog.query_selector("#imageModalLabel").unwrap().expect("title");
    assert_eq!(title.text_content().as_deref(), Some("Image"));
    let link = dialog.query_selector("#downloadLink").unwrap().expect("link");
    assert_eq!(link.get_attribute("href").as_deref(), Some("/files/9"));
    drop(viewer);
}

#[wasm_bindgen_test]
async fn unmarked_click_changes_nothing() {
    let client = FakeClient::serving("");
    let (viewer, reloads) = install("idle", client.clone());
    let host = mount(r#"<div id="idle-section">pristine</div><button class="plain">Save</button>"#);

    click(&host, ".plain");
    settle().await;

    assert!(!viewer.preview().is_mounted());
    assert!(document().get_element_by_id("idle-image").is_none());
    assert!(client.calls().is_empty());
    assert_eq!(reloads.get(), 0);
    assert_eq!(viewer.pictures().flow().section(), SectionState::Pristine);
}

#[wasm_bindgen_test]
async fn choice_posts_once_and_substitutes_section() {
    let client = FakeClient::serving(
        r#"<html><body><div id="swap-section"><img class="current" src="/files/preview/7"></div></body></html>"#,
    );
    let (viewer, reloads) = install("swap", client.clone());
    let host = mount(
        r#"<div id="swap-chooser" class="modal"></div>
           <button class="open" data-set-profile-picture>Choose</button>
           <div id="swap-section"><p>old</p></div>
           <div data-profile-picture-choice data-entity-id="42" data-entity-type="user" data-file-id="7"><img class="candidate" src="/files/preview/7"></div>"#,
    );

    click(&host, ".open");
    let chooser = document().get_element_by_id("swap-chooser").expect("chooser");
    assert!(chooser.class_list().contains("show"));

    click(&host, ".candidate");
    assert!(!chooser.class_list().contains("show"));
    let section = document().get_element_by_id("swap-section").expect("section");
    assert!(section.inner_html().contains("spinner-border"));
    settle().await;

    assert_eq!(
        client.calls(),
        vec![
            "POST /user/42/set-profile-picture/7".to_string(),
            "GET /user/42".to_string(),
        ]
    );
    assert!(section.query_selector("img.current").unwrap().is_some());
    assert_eq!(viewer.pictures().flow().section(), SectionState::Updated);
    assert_eq!(reloads.get(), 0);
}

#[wasm_bindgen_test]
async fn failed_post_shows_error_with_reload_control() {
    let client = FakeClient::serving("<div id=\"fail-section\">new</div>");
    client.post_status.set(500);
    let (viewer, reloads) = install("fail", client.clone());
    let host = mount(
        r#"<div id="fail-section">old</div>
           <a class="choice" href="/never" data-profile-picture-choice data-entity-id="3" data-entity-type="material" data-file-id="5">pick</a>"#,
    );

    click(&host, ".choice");
    settle().await;

    assert_eq!(
        client.calls(),
        vec!["POST /material/3/set-profile-picture/5".to_string()]
    );
    let section = document().get_element_by_id("fail-section").expect("section");
    assert!(section.inner_html().contains("alert-danger"));
    assert!(!section.inner_html().contains("new"));
    assert_eq!(viewer.pictures().flow().section(), SectionState::Failed);
    assert_eq!(reloads.get(), 0);

    click(&section, "[data-page-reload]");
    assert_eq!(reloads.get(), 1);
}

#[wasm_bindgen_test]
async fn missing_fragment_reloads_page() {
    let client = FakeClient::serving("<html><body><p>no section here</p></body></html>");
    let (_viewer, reloads) = install("reload", client.clone());
    let host = mount(
        r#"<div id="reload-section">old</div>
           <span class="choice" data-profile-picture-choice data-entity-id="8" data-entity-type="product" data-file-id="1">pick</span>"#,
    );

    click(&host, ".choice");
    settle().await;

    assert_eq!(client.calls().len(), 2);
    assert_eq!(reloads.get(), 1);
}

#[wasm_bindgen_test]
async fn double_click_while_in_flight_posts_once() {
    let client = FakeClient::serving("");
    client.hang_post.set(true);
    let (viewer, _reloads) = install("busy", client.clone());
    let host = mount(
        r#"<div id="busy-section">old</div>
           <span class="choice" data-profile-picture-choice data-entity-id="8" data-entity-type="product" data-file-id="1">pick</span>"#,
    );

    click(&host, ".choice");
    click(&host, ".choice");
    settle().await;

    assert_eq!(
        client.calls(),
        vec!["POST /product/8/set-profile-picture/1".to_string()]
    );
    assert!(viewer.pictures().flow().in_flight());
}

#[wasm_bindgen_test]
async fn submit_transport_failure_shows_error() {
    let client = FakeClient::serving("<div id=\"netdown-section\">new</div>");
    *client.post_error.borrow_mut() = Some(RefreshError::Transport {
        stage: RequestStage::Submit,
        message: "network unreachable".to_string(),
    });
    let (viewer, reloads) = install("netdown", client.clone());
    let host = mount(
        r#"<div id="netdown-section">old</div>
           <span class="choice" data-profile-picture-choice data-entity-id="2" data-entity-type="material" data-file-id="9">pick</span>"#,
    );

    click(&host, ".choice");
    settle().await;

    assert_eq!(
        client.calls(),
        vec!["POST /material/2/set-profile-picture/9".to_string()]
    );
    let section = document().get_element_by_id("netdown-section").expect("section");
    assert_error_shown(&section);
    assert_eq!(viewer.pictures().flow().section(), SectionState::Failed);
    assert_eq!(reloads.get(), 0);
}

#[wasm_bindgen_test]
async fn refresh_failures_show_error_after_successful_post() {
    let failures = [
        RefreshError::Transport {
            stage: RequestStage::Refresh,
            message: "connection reset".to_string(),
        },
        RefreshError::Body("stream aborted".to_string()),
    ];
    for (round, failure) in failures.into_iter().enumerate() {
        let prefix = format!("refresh-fail-{round}");
        let client = FakeClient::serving("");
        *client.get_error.borrow_mut() = Some(failure);
        let (viewer, reloads) = install(&prefix, client.clone());
        let host = mount(&format!(
            r#"<div id="{prefix}-section">old</div>
               <span class="choice" data-profile-picture-choice data-entity-id="5" data-entity-type="product" data-file-id="6">pick</span>"#
        ));

        click(&host, ".choice");
        settle().await;

        assert_eq!(
            client.calls(),
            vec![
                "POST /product/5/set-profile-picture/6".to_string(),
                "GET /product/5".to_string(),
            ]
        );
        let section = document()
            .get_element_by_id(&format!("{prefix}-section"))
            .expect("section");
        assert_error_shown(&section);
        assert_eq!(viewer.pictures().flow().section(), SectionState::Failed);
        assert_eq!(reloads.get(), 0);

        click(&section, "[data-page-reload]");
        assert_eq!(reloads.get(), 1);
    }
}

#[wasm_bindgen_test]
async fn missing_live_section_reloads_after_success() {
    let client = FakeClient::serving(
        r#"<html><body><div id="nolive-section"><img src="/files/preview/3"></div></body></html>"#,
    );
    let (viewer, reloads) = install("nolive", client.clone());
    let host = mount(
        r#"<span class="choice" data-profile-picture-choice data-entity-id="4" data-entity-type="material" data-file-id="3">pick</span>"#,
    );

    click(&host, ".choice");
    settle().await;

    assert_eq!(
        client.calls(),
        vec![
            "POST /material/4/set-profile-picture/3".to_string(),
            "GET /material/4".to_string(),
        ]
    );
    assert!(document().get_element_by_id("nolive-section").is_none());
    assert_eq!(reloads.get(), 1);
    assert!(!viewer.pictures().flow().in_flight());
}

#[wasm_bindgen_test]
async fn window_entry_points_reach_the_global_viewer() {
    let client = FakeClient::serving(
        r#"<div id="global-section"><img class="fresh" src="/files/preview/7"></div>"#,
    );
    let mut config = config("global");
    config.labels.default_image_name = "Picture".to_string();
    let (viewer, _reloads) = install_with_config(config, client.clone());
    viewer.make_global().expect("globals");
    let _host = mount(
        r#"<div id="global-chooser" class="modal"></div><div id="global-section">old</div>"#,
    );

    window_fn("openSetProfilePictureModal")
        .call0(&JsValue::NULL)
        .expect("open chooser");
    let chooser = document().get_element_by_id("global-chooser").expect("chooser");
    assert!(chooser.class_list().contains("show"));

    window_fn("openImageModal")
        .call2(&JsValue::NULL, &JsValue::from_str("/files/preview/5"), &JsValue::UNDEFINED)
        .expect("open image");
    let dialog = document().get_element_by_id("global-image").expect("dialog");
    let title = dialog.query_selector("#imageModalLabel").unwrap().expect("title");
    assert_eq!(title.text_content().as_deref(), Some("Picture"));
    let link = dialog.query_selector("#downloadLink").unwrap().expect("link");
    assert_eq!(link.get_attribute("href").as_deref(), Some("/files/5"));

    let set_picture = window_fn("setProfilePicture");
    set_picture
        .call3(
            &JsValue::NULL,
            &JsValue::from(42),
            &JsValue::from_str("user"),
            &JsValue::from(7),
        )
        .expect("set picture");
    settle().await;
    assert_eq!(
        client.calls(),
        vec![
            "POST /user/42/set-profile-picture/7".to_string(),
            "GET /user/42".to_string(),
        ]
    );
    assert!(!chooser.class_list().contains("show"));
    let section = document().get_element_by_id("global-section").expect("section");
    assert!(section.query_selector("img.fresh").unwrap().is_some());

    // 2^64 formats like JS String(n), not as a saturated integer.
    set_picture
        .call3(
            &JsValue::NULL,
            &JsValue::from_f64(18_446_744_073_709_551_616.0),
            &JsValue::from_str("user"),
            &JsValue::from_f64(1.5),
        )
        .expect("set picture");
    settle().await;
    assert_eq!(
        client.calls().get(2).map(String::as_str),
        Some("POST /user/18446744073709552000/set-profile-picture/1.5")
    );

    release_global();
    let calls_before = client.calls().len();
    set_picture
        .call3(
            &JsValue::NULL,
            &JsValue::from_str("1"),
            &JsValue::from_str("user"),
            &JsValue::from_str("2"),
        )
        .expect("set picture");
    settle().await;
    assert_eq!(client.calls().len(), calls_before);
}
