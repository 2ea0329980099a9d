//! Scrape pipeline: capture the listing page, extract course cards,
//! memoize the resulting collection.
//!
//! - [`selectors`]: literal couplings to the source site's markup
//! - [`extract::CardExtractor`]: tolerant per-card field extraction
//! - [`source::ListingSource`]: "capture the fully-loaded listing" seam
//! - [`catalog::CourseCatalog`]: the one pipeline operation, with caching
pub mod catalog;
pub mod extract;
pub mod selectors;
pub mod source;
