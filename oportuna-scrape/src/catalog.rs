use crate::extract::CardExtractor;
use crate::source::ListingSource;
use oportuna_common::{CourseRecord, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

/// The pipeline's single operation: fetch the current course collection.
///
/// The first `fetch` scrapes; later fetches within the same process return
/// the memoized collection without touching the browser. This is a pure
/// memoization contract, not a freshness guarantee — the cache only empties
/// through [`CourseCatalog::invalidate`].
pub struct CourseCatalog {
    source: Arc<dyn ListingSource>,
    extractor: CardExtractor,
    cache: Mutex<Option<Arc<Vec<CourseRecord>>>>,
}

impl CourseCatalog {
    pub fn new(source: Arc<dyn ListingSource>, base: Url) -> Self {
        Self {
            source,
            extractor: CardExtractor::new(base),
            cache: Mutex::new(None),
        }
    }

    /// Fetch the full ordered record sequence, scraping at most once per
    /// process lifetime. An empty collection is a valid outcome, and it is
    /// cached like any other.
    ///
    /// The cache lock is held across the scrape so concurrent callers wait
    /// for one capture instead of racing their own browser sessions.
    pub async fn fetch(&self) -> Result<Arc<Vec<CourseRecord>>> {
        let mut slot = self.cache.lock().await;

        if let Some(records) = slot.as_ref() {
            debug!(target: "scrape.catalog", count = records.len(), "serving memoized catalog");
            return Ok(Arc::clone(records));
        }

        let capture = self.source.capture().await?;
        let records = Arc::new(self.extractor.extract_all(&capture.html));
        info!(
            target: "scrape.catalog",
            count = records.len(),
            checksum = %capture.checksum,
            "catalog scraped"
        );

        *slot = Some(Arc::clone(&records));
        Ok(records)
    }

    /// Drop the memoized collection; the next fetch scrapes again.
    pub async fn invalidate(&self) {
        let mut slot = self.cache.lock().await;
        if slot.take().is_some() {
            info!(target: "scrape.catalog", "catalog cache invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ListingCapture;
    use async_trait::async_trait;
    use oportuna_common::OportunaError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that serves fixed markup and counts captures.
    struct CannedSource {
        html: &'static str,
        captures: AtomicUsize,
    }

    impl CannedSource {
        fn new(html: &'static str) -> Self {
            Self {
                html,
                captures: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ListingSource for CannedSource {
        async fn capture(&self) -> Result<ListingCapture> {
            self.captures.fetch_add(1, Ordering::SeqCst);
            Ok(ListingCapture {
                url: Url::parse("https://www.ev.org.br/cursos").unwrap(),
                html: self.html.to_string(),
                checksum: blake3::hash(self.html.as_bytes()).to_hex().to_string(),
            })
        }
    }

    /// Source whose session never starts.
    struct BrokenSource;

    #[async_trait]
    impl ListingSource for BrokenSource {
        async fn capture(&self) -> Result<ListingCapture> {
            Err(OportunaError::Session("no webdriver listening".into()))
        }
    }

    const TWO_CARDS: &str = r#"
        <a class="card-curso" href="/cursos/excel">
          <h3 class="card-curso__titulo">Excel</h3>
        </a>
        <a class="card-curso" href="/cursos/python">
          <h3 class="card-curso__titulo">Python</h3>
        </a>"#;

    fn catalog_over(source: Arc<dyn ListingSource>) -> CourseCatalog {
        CourseCatalog::new(source, Url::parse("https://www.ev.org.br").unwrap())
    }

    #[tokio::test]
    async fn repeated_fetches_reuse_the_first_capture() {
        let source = Arc::new(CannedSource::new(TWO_CARDS));
        let catalog = catalog_over(source.clone());

        let first = catalog.fetch().await.unwrap();
        let second = catalog.fetch().await.unwrap();

        // Element-wise equal, same order, and no second navigation.
        assert_eq!(*first, *second);
        assert_eq!(source.captures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_a_fresh_scrape() {
        let source = Arc::new(CannedSource::new(TWO_CARDS));
        let catalog = catalog_over(source.clone());

        catalog.fetch().await.unwrap();
        catalog.invalidate().await;
        catalog.fetch().await.unwrap();

        assert_eq!(source.captures.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_cards_yields_an_empty_collection_not_an_error() {
        let source = Arc::new(CannedSource::new("<html><body></body></html>"));
        let catalog = catalog_over(source);

        let records = catalog.fetch().await.unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn empty_result_is_cached_too() {
        let source = Arc::new(CannedSource::new("<html></html>"));
        let catalog = catalog_over(source.clone());

        catalog.fetch().await.unwrap();
        catalog.fetch().await.unwrap();

        assert_eq!(source.captures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn session_failure_surfaces_as_no_data() {
        let catalog = catalog_over(Arc::new(BrokenSource));

        let err = catalog.fetch().await.unwrap_err();

        assert!(matches!(err, OportunaError::Session(_)));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_the_cache_cold() {
        // A failure must not poison the cache: a later healthy source swap
        // is out of scope, but a retry against the same broken source still
        // attempts a capture.
        struct FlakySource {
            captures: AtomicUsize,
        }

        #[async_trait]
        impl ListingSource for FlakySource {
            async fn capture(&self) -> Result<ListingCapture> {
                let attempt = self.captures.fetch_add(1, Ordering::SeqCst);
                if attempt == 0 {
                    Err(OportunaError::Navigation {
                        url: "https://www.ev.org.br/cursos".into(),
                        reason: "timed out".into(),
                    })
                } else {
                    Ok(ListingCapture {
                        url: Url::parse("https://www.ev.org.br/cursos").unwrap(),
                        html: TWO_CARDS.to_string(),
                        checksum: "deadbeef".into(),
                    })
                }
            }
        }

        let source = Arc::new(FlakySource {
            captures: AtomicUsize::new(0),
        });
        let catalog = catalog_over(source.clone());

        assert!(catalog.fetch().await.is_err());
        let records = catalog.fetch().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(source.captures.load(Ordering::SeqCst), 2);
    }
}
