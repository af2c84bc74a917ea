//! HTTP seam between the profile picture controller and the server.

use futures_util::future::{FutureExt, LocalBoxFuture};
use gloo::net::http::Request;

use bomviewer_core::{RefreshError, RequestStage};

pub trait PageClient {
    /// Sends the state-changing POST; non-2xx statuses are errors.
    fn post(&self, path: &str) -> LocalBoxFuture<'static, Result<(), RefreshError>>;

    /// Fetches a rendered page as text. The status is not checked: an error
    /// page simply lacks the fragment the caller looks for.
    fn get_html(&self, path: &str) -> LocalBoxFuture<'static, Result<String, RefreshError>>;
}

/// [`PageClient`] backed by the browser's `fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchClient;

impl PageClient for FetchClient {
    fn post(&self, path: &str) -> LocalBoxFuture<'static, Result<(), RefreshError>> {
        let path = path.to_string();
        async move {
            let response = Request::post(&path)
                .header("Content-Type", "application/json")
                .send()
                .await
                .map_err(|err| RefreshError::Transport {
                    stage: RequestStage::Submit,
                    message: err.to_string(),
                })?;
            if !response.ok() {
                return Err(RefreshError::Status {
                    stage: RequestStage::Submit,
                    status: response.status(),
                });
            }
            Ok(())
        }
        .boxed_local()
    }

    fn get_html(&self, path: &str) -> LocalBoxFuture<'static, Result<String, RefreshError>> {
        let path = path.to_string();
        async move {
            let response = Request::get(&path)
                .send()
                .await
                .map_err(|err| RefreshError::Transport {
                    stage: RequestStage::Refresh,
                    message: err.to_string(),
                })?;
            response
                .text()
                .await
                .map_err(|err| RefreshError::Body(err.to_string()))
        }
        .boxed_local()
    }
}
