use async_trait::async_trait;
use oportuna_common::Result;
use oportuna_drivers::ev_browser::driver::{BrowserSettings, ListingDriver};
use oportuna_drivers::ev_browser::scroll::{load_until_stable, ScrollSettings};
use tracing::info;
use url::Url;
use uuid::Uuid;

/// One fully-loaded snapshot of the listing page.
#[derive(Debug, Clone)]
pub struct ListingCapture {
    pub url: Url,
    pub html: String,
    /// Content hash of the serialized markup, logged so repeated scrapes of
    /// an unchanged page are recognizable in the logs.
    pub checksum: String,
}

/// The "obtain the fully rendered listing" seam.
///
/// The catalog depends on this trait rather than on a browser so that the
/// pipeline is testable without a WebDriver service.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn capture(&self) -> Result<ListingCapture>;
}

/// Concrete source backed by the fantoccini driver.
///
/// Each capture acquires its own browser session and closes it on every
/// exit path; nothing is shared across captures, so concurrent callers each
/// pay for their own session.
pub struct BrowserListingSource {
    listing_url: Url,
    browser: BrowserSettings,
    scroll: ScrollSettings,
}

impl BrowserListingSource {
    pub fn new(listing_url: Url, browser: BrowserSettings, scroll: ScrollSettings) -> Self {
        Self {
            listing_url,
            browser,
            scroll,
        }
    }

    async fn capture_with(&self, driver: &mut ListingDriver) -> Result<ListingCapture> {
        let mut page = driver.goto(self.listing_url.as_str()).await?;
        let html = load_until_stable(&mut page, &self.scroll).await?;
        let checksum = blake3::hash(html.as_bytes()).to_hex().to_string();

        Ok(ListingCapture {
            url: self.listing_url.clone(),
            html,
            checksum,
        })
    }
}

#[async_trait]
impl ListingSource for BrowserListingSource {
    async fn capture(&self) -> Result<ListingCapture> {
        let scrape_id = Uuid::new_v4();
        info!(
            target: "scrape.capture",
            %scrape_id,
            url = %self.listing_url,
            "starting listing capture"
        );

        // Session startup failure is fatal and leaves nothing to tear down.
        let mut driver = ListingDriver::new(&self.browser).await?;

        // From here on the session must be closed whatever happens.
        let outcome = self.capture_with(&mut driver).await;
        let _ = driver.close().await;

        match &outcome {
            Ok(capture) => info!(
                target: "scrape.capture",
                %scrape_id,
                bytes = capture.html.len(),
                checksum = %capture.checksum,
                "listing captured"
            ),
            Err(err) => info!(target: "scrape.capture", %scrape_id, %err, "capture failed"),
        }
        outcome
    }
}
