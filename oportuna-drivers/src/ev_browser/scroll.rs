//! Height-convergence loop for infinite-scroll listings.
//!
//! The source page appends cards as the viewport approaches the bottom, so
//! the only way to obtain the complete document is to keep scrolling to the
//! current bottom and waiting until the rendered height stops growing. This
//! is a polling loop, not an event subscription: the page offers no signal
//! for "done loading".

use async_trait::async_trait;
use oportuna_common::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// The scripting capability the convergence loop needs from a page.
///
/// [`crate::ev_browser::page::ListingPage`] implements this over a live
/// WebDriver session; tests implement it with a scripted fake.
#[async_trait]
pub trait ScrollSurface {
    /// Total rendered height of the document.
    async fn document_height(&mut self) -> Result<u64>;
    /// Scroll the viewport to `height`.
    async fn scroll_to(&mut self, height: u64) -> Result<()>;
    /// Full serialization of the current DOM.
    async fn page_source(&mut self) -> Result<String>;
}

/// Tuning for the convergence loop.
#[derive(Debug, Clone)]
pub struct ScrollSettings {
    /// Fixed pause after each scroll so lazily-loaded content can arrive.
    pub settle: Duration,
    /// Hard cap on scroll rounds for pages whose height never stabilizes.
    pub max_rounds: usize,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            settle: Duration::from_secs(2),
            max_rounds: 40,
        }
    }
}

/// Scroll until two consecutive height measurements agree, then return the
/// final DOM serialization.
///
/// The loop is bounded by [`ScrollSettings::max_rounds`]; on exhaustion it
/// keeps whatever content has loaded rather than failing, since a partial
/// listing is still useful to the caller.
pub async fn load_until_stable<S>(surface: &mut S, settings: &ScrollSettings) -> Result<String>
where
    S: ScrollSurface + Send,
{
    let mut height = surface.document_height().await?;

    for round in 0..settings.max_rounds {
        surface.scroll_to(height).await?;
        sleep(settings.settle).await;

        let next = surface.document_height().await?;
        debug!(target: "browser.scroll", round, height, next, "scroll round finished");

        if next == height {
            return surface.page_source().await;
        }
        height = next;
    }

    warn!(
        target: "browser.scroll",
        rounds = settings.max_rounds,
        "page height never stabilized; keeping the content loaded so far"
    );
    surface.page_source().await
}
