//! Presentation shell over the course dataset.
//!
//! Consumes a tabular dataset (a classified CSV or a live scrape) plus a
//! small set of discrete filter selections and produces HTML. Entirely
//! deterministic and stateless per render; the only state is the explicit
//! welcome lifecycle in [`welcome::ShellSession`].
//!
//! - [`dataset`]: load/normalize the classified CSV, ingest scraped records
//! - [`filter`]: equality filters over focus area / institution / duration
//! - [`render`]: HTML table and card-grid renderers
//! - [`welcome`]: two-state welcome lifecycle threaded through rendering
pub mod dataset;
pub mod filter;
pub mod render;
pub mod welcome;
