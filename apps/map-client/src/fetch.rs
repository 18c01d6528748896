use gloo_net::http::Request;
use viewer_core::{FetchResponse, ResourceFetcher, Result, ViewerError};

/// `fetch()` against the page origin.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserFetcher;

impl ResourceFetcher for BrowserFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse> {
        let resp = Request::get(path)
            .send()
            .await
            .map_err(|e| ViewerError::Transport(e.to_string()))?;

        let status = resp.status();
        if !resp.ok() {
            return Ok(FetchResponse {
                status,
                body: String::new(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ViewerError::Transport(e.to_string()))?;
        Ok(FetchResponse { status, body })
    }
}
