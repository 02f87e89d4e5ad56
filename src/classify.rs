use crate::constants::{ASSIGNMENT_TOKEN, DIRECT_AWARD_PHRASE, DIRECT_TOKEN};
use crate::text::normalize_text;

/// Derived classification of a procurement procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardMode {
    /// Non-competitive direct award
    Direct,
    /// Any competitive process
    Competition,
    /// No procedure type recorded
    Unknown,
}

impl AwardMode {
    /// Returns a human-readable label for result cards.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Direct => "Direct award",
            Self::Competition => "Competition",
            Self::Unknown => "Uncategorized",
        }
    }
}

/// Classifies a free-text procedure type into an award mode.
///
/// The text is normalized (lowercase, accents stripped) and matched against
/// the Greek token pair "απευθειας" + "αναθεσ" or the literal phrase
/// "direct award". Missing or empty input classifies as
/// [`AwardMode::Unknown`]; anything else that does not look like a direct
/// award is a competition. Never fails.
pub fn classify_award_mode(procedure_type: Option<&str>) -> AwardMode {
    let p = normalize_text(procedure_type.unwrap_or(""));
    if p.is_empty() {
        return AwardMode::Unknown;
    }

    let is_direct = (p.contains(DIRECT_TOKEN) && p.contains(ASSIGNMENT_TOKEN))
        || p.contains(DIRECT_AWARD_PHRASE);
    if is_direct {
        return AwardMode::Direct;
    }

    AwardMode::Competition
}
