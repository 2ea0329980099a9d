use crate::selectors;
use oportuna_common::{or_na, CourseRecord, NA};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

/// Extracts [`CourseRecord`]s from rendered listing markup.
///
/// Extraction is tolerant per field: a missing title, duration, level, or
/// href resolves to the `"N/A"` sentinel and keeps the card. Only a card
/// whose own structure cannot be made sense of (for example an href that is
/// not a resolvable reference) is dropped, and dropping one card never
/// affects the cards after it.
pub struct CardExtractor {
    base: Url,
    card: Selector,
    title: Selector,
    info: Selector,
    value: Selector,
    duration_label: Regex,
    level_label: Regex,
}

impl CardExtractor {
    /// Build an extractor resolving links against the site's base origin.
    pub fn new(base: Url) -> Self {
        // Selector and regex literals live in `selectors`; parsing them
        // cannot fail at runtime.
        Self {
            base,
            card: Selector::parse(selectors::COURSE_CARD).unwrap(),
            title: Selector::parse(selectors::CARD_TITLE).unwrap(),
            info: Selector::parse(selectors::CARD_INFO).unwrap(),
            value: Selector::parse(selectors::INFO_VALUE).unwrap(),
            duration_label: Regex::new(selectors::DURATION_LABEL).unwrap(),
            level_label: Regex::new(selectors::LEVEL_LABEL).unwrap(),
        }
    }

    /// Extractor for the production origin.
    pub fn for_escola_virtual() -> Self {
        Self::new(Url::parse(selectors::BASE_ORIGIN).expect("static origin parses"))
    }

    /// Extract every course card from `html`, in document order.
    pub fn extract_all(&self, html: &str) -> Vec<CourseRecord> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();

        for card in document.select(&self.card) {
            match self.extract_card(card) {
                Some(record) => records.push(record),
                None => {
                    warn!(target: "scrape.extract", "dropping malformed course card");
                }
            }
        }

        records
    }

    /// One card. `None` means the card itself was malformed and is skipped;
    /// individually missing fields come back as the sentinel instead.
    fn extract_card(&self, card: ElementRef<'_>) -> Option<CourseRecord> {
        let title = card
            .select(&self.title)
            .next()
            .map(element_text)
            .map(or_na)
            .unwrap_or_else(|| NA.to_string());

        let duration = self.labeled_value(card, &self.duration_label);
        let level = self.labeled_value(card, &self.level_label);

        let link = match card.value().attr("href") {
            None => NA.to_string(),
            Some(href) => match self.base.join(href) {
                Ok(resolved) => resolved.to_string(),
                Err(err) => {
                    warn!(target: "scrape.extract", %href, %err, "unresolvable course link");
                    return None;
                }
            },
        };

        Some(CourseRecord {
            title,
            duration,
            level,
            link,
        })
    }

    /// Value of the first info line whose text matches `label`, or the
    /// sentinel when no line matches or the matched line has no nested
    /// emphasized value.
    fn labeled_value(&self, card: ElementRef<'_>, label: &Regex) -> String {
        for line in card.select(&self.info) {
            let text = element_text(line);
            if !label.is_match(&text) {
                continue;
            }
            return line
                .select(&self.value)
                .next()
                .map(element_text)
                .map(or_na)
                .unwrap_or_else(|| NA.to_string());
        }
        NA.to_string()
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
