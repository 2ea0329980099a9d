use crate::ev_browser::page::ListingPage;
use fantoccini::{Client, ClientBuilder};
use oportuna_common::{OportunaError, Result};
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, info};
use webdriver::capabilities::Capabilities;

/// How the browser session is launched.
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// WebDriver endpoint, e.g. a local Chromedriver.
    pub webdriver_url: String,
    /// Run without a visible window.
    pub headless: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
        }
    }
}

/// Chrome arguments for an isolated, non-interactive session: no persistent
/// profile, sandbox disabled so the browser runs inside containers.
fn build_browser_arguments(headless: bool) -> Vec<String> {
    let mut args = vec![
        "--incognito".to_string(),
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--window-size=1280,1024".to_string(),
    ];
    if headless {
        args.push("--headless=new".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}

/// Thin wrapper around a `fantoccini` WebDriver client scoped to one scrape.
///
/// A driver is the one scarce external resource of a scrape pass: acquire it
/// at the start, and call [`ListingDriver::close`] on every exit path.
pub struct ListingDriver {
    pub client: Client,
}

impl ListingDriver {
    /// Create a new driver connected to a running WebDriver service.
    ///
    /// A startup failure here is fatal to the whole scrape; there is no
    /// retry and no session to tear down yet.
    pub async fn new(settings: &BrowserSettings) -> Result<Self> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();
        chrome_opts.insert(
            "args".to_string(),
            json!(build_browser_arguments(settings.headless)),
        );
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        debug!(
            webdriver_url = %settings.webdriver_url,
            headless = settings.headless,
            "starting browser session"
        );

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&settings.webdriver_url)
            .await
            .map_err(|e| OportunaError::Session(e.to_string()))?;

        Ok(Self { client })
    }

    /// Navigate to `url` and return a [`ListingPage`] over the session.
    pub async fn goto(&mut self, url: &str) -> Result<ListingPage> {
        self.client
            .goto(url)
            .await
            .map_err(|e| OportunaError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        info!(target: "browser.session", %url, "navigation complete");
        Ok(ListingPage::new(self.client.clone()))
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await.map_err(anyhow::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_arguments_extend_the_base_set() {
        let headed = build_browser_arguments(false);
        let headless = build_browser_arguments(true);

        assert!(headed.iter().any(|a| a == "--incognito"));
        assert!(headed.iter().any(|a| a == "--no-sandbox"));
        assert!(!headed.iter().any(|a| a.starts_with("--headless")));

        assert!(headless.iter().any(|a| a == "--headless=new"));
        assert!(headless.iter().any(|a| a == "--disable-gpu"));
    }
}
