//! CSS anchors into the Escola Virtual listing markup.
//!
//! These constants are literal couplings to the site's current class names
//! and label wording. If the site renames the card class or rewords the
//! "Duração"/"Nível" labels, extraction degrades silently to the "N/A"
//! sentinel for the affected fields; it does not fail loudly. That coupling
//! is accepted: the labels carry no structure beyond their literal text.

/// Base origin used to absolutize relative course links.
pub const BASE_ORIGIN: &str = "https://www.ev.org.br";

/// A course card is an anchor carrying this marker class. Fragments with the
/// class but no anchor are not cards and are never selected.
pub const COURSE_CARD: &str = "a.card-curso";

/// Heading inside a card holding the course title.
pub const CARD_TITLE: &str = ".card-curso__titulo";

/// Labeled info line inside a card ("Duração: …", "Nível: …").
pub const CARD_INFO: &str = ".card-curso__info";

/// Emphasized value nested in an info line.
pub const INFO_VALUE: &str = "b";

/// Label pattern marking the duration info line.
pub const DURATION_LABEL: &str = r"(?i)dura[cç][aã]o";

/// Label pattern marking the proficiency-level info line.
pub const LEVEL_LABEL: &str = r"(?i)n[ií]vel";
