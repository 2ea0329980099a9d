use crate::ev_browser::scroll::ScrollSurface;
use anyhow::anyhow;
use async_trait::async_trait;
use fantoccini::Client;
use oportuna_common::Result;
use serde_json::json;

/// Page wrapper exposing exactly the scripting surface the scroll loop
/// needs: measure the document height, scroll to a height, serialize the
/// DOM. Anything richer stays out so the loop remains testable against a
/// fake.
pub struct ListingPage {
    client: Client,
}

impl ListingPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Total rendered height of the document in CSS pixels.
    pub async fn document_height(&mut self) -> Result<u64> {
        let value = self
            .client
            .execute("return document.body.scrollHeight;", vec![])
            .await
            .map_err(anyhow::Error::from)?;
        value
            .as_u64()
            .or_else(|| value.as_f64().map(|h| h as u64))
            .ok_or_else(|| anyhow!("scrollHeight was not numeric: {value}").into())
    }

    /// Scroll the viewport to `height`.
    pub async fn scroll_to(&mut self, height: u64) -> Result<()> {
        self.client
            .execute("window.scrollTo(0, arguments[0]);", vec![json!(height)])
            .await
            .map_err(anyhow::Error::from)?;
        Ok(())
    }

    /// Full serialization of the current DOM.
    pub async fn page_source(&mut self) -> Result<String> {
        Ok(self.client.source().await.map_err(anyhow::Error::from)?)
    }

    /// Return the page title.
    pub async fn title(&mut self) -> Result<String> {
        Ok(self.client.title().await.map_err(anyhow::Error::from)?)
    }

    /// Return the current page URL.
    pub async fn current_url(&mut self) -> Result<String> {
        Ok(self
            .client
            .current_url()
            .await
            .map_err(anyhow::Error::from)?
            .to_string())
    }
}

#[async_trait]
impl ScrollSurface for ListingPage {
    async fn document_height(&mut self) -> Result<u64> {
        ListingPage::document_height(self).await
    }

    async fn scroll_to(&mut self, height: u64) -> Result<()> {
        ListingPage::scroll_to(self, height).await
    }

    async fn page_source(&mut self) -> Result<String> {
        ListingPage::page_source(self).await
    }
}
