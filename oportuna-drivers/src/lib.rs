//! Driver layer for browser automation.
//!
//! This crate exposes the WebDriver session wrapper and the scroll-driven
//! page loader used to obtain fully rendered listing markup from pages that
//! load content lazily as the viewport scrolls.
//!
//! - [`ev_browser::driver::ListingDriver`]: WebDriver client wrapper
//! - [`ev_browser::page::ListingPage`]: narrow DOM scripting capability
//! - [`ev_browser::scroll`]: height-convergence loop over [`ev_browser::scroll::ScrollSurface`]
pub mod ev_browser;
