//! Common types and utilities shared across Oportuna crates.
//!
//! This crate defines the scraped course record, the shared error type, and
//! the observability helpers used throughout the Oportuna workspace. It is
//! intentionally lightweight so that every crate can depend on it without
//! pulling in browser or parsing machinery.
//!
//! # Overview
//!
//! - [`CourseRecord`]: One normalized course listing
//! - [`NA`] and [`or_na`]: The fixed placeholder for unextractable fields
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`OportunaError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! Every record field is either a real extracted value or exactly [`NA`]:
//!
//! ```rust
//! use oportuna_common::{or_na, CourseRecord, NA};
//!
//! let record = CourseRecord {
//!     title: "Excel Avançado".into(),
//!     duration: or_na(String::new()),
//!     level: "Básico".into(),
//!     link: NA.to_string(),
//! };
//! assert_eq!(record.duration, NA);
//! assert!(record.is_complete());
//! ```
use serde::{Deserialize, Serialize};

pub mod observability;

/// Placeholder used whenever a field cannot be extracted from the source
/// page. Records never carry an empty or absent field, only real text or
/// this sentinel.
pub const NA: &str = "N/A";

/// Replace blank extracted text with the [`NA`] sentinel.
pub fn or_na(value: String) -> String {
    if value.trim().is_empty() {
        NA.to_string()
    } else {
        value
    }
}

/// One scraped course listing.
///
/// Produced in document order by a single scrape pass. Duplicate titles are
/// legal; the source site can list near-duplicate courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Display name of the course.
    pub title: String,
    /// Free-form duration text, e.g. "4 horas".
    pub duration: String,
    /// Free-form proficiency label, e.g. "Básico".
    pub level: String,
    /// Absolute URL of the course detail page.
    pub link: String,
}

impl CourseRecord {
    /// True when every field holds either extracted text or the sentinel,
    /// never blank. All constructors in this workspace uphold this; the
    /// check exists for assertions at trust boundaries and in tests.
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.duration, &self.level, &self.link]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Error types used across the Oportuna system.
///
/// Only session and navigation failures abort a scrape; row-level anomalies
/// are absorbed by the extractor and never reach this enum.
#[derive(thiserror::Error, Debug)]
pub enum OportunaError {
    /// The WebDriver session could not be started. Fatal: surfaced as
    /// "no data", never as a partial result.
    #[error("browser session could not be started: {0}")]
    Session(String),

    /// Navigation to the listing page failed. Fatal, same as above.
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Any other browser-command failure after a session is up.
    #[error("driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`OportunaError`].
pub type Result<T> = std::result::Result<T, OportunaError>;
