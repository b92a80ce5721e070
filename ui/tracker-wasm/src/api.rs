//! Static content fetches.
//!
//! The three data documents are fetched relative to the page, so the
//! frontend works from any static host that serves `data/` next to it.

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use gloo_net::http::Request;
use st_content::{ContentSource, Resource};

/// Browser `fetch` as a [`ContentSource`].
#[derive(Debug, Default, Clone)]
pub struct BrowserSource {
    base: String,
}

impl BrowserSource {
    /// `base` is prepended to each resource path; empty means page-relative.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        let base = if base.is_empty() || base.ends_with('/') {
            base
        } else {
            format!("{base}/")
        };
        Self { base }
    }

    pub fn url_for(&self, resource: Resource) -> String {
        format!("{}{}", self.base, resource.path())
    }
}

#[async_trait(?Send)]
impl ContentSource for BrowserSource {
    async fn fetch_text(&self, resource: Resource) -> Result<String> {
        let url = self.url_for(resource);
        let resp = Request::get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("fetch error: {e}"))?;

        if !resp.ok() {
            bail!("{} {}", resp.status(), resp.status_text());
        }

        resp.text().await.map_err(|e| anyhow!("text error: {e}"))
    }
}
