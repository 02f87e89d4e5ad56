use crate::classify::{classify_award_mode, AwardMode};
use crate::constants::*;
use crate::cpv::node_matches_record;
use crate::models::{CpvNode, Record, RecordKind};

/// Award-mode selector. `Competition` passes everything that is not a
/// classified direct award, so records with an unknown mode show up under
/// competition rather than disappearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AwardModeFilter {
    #[default]
    All,
    Direct,
    Competition,
}

impl AwardModeFilter {
    pub fn matches(&self, mode: AwardMode) -> bool {
        match self {
            Self::All => true,
            Self::Direct => mode == AwardMode::Direct,
            Self::Competition => mode != AwardMode::Direct,
        }
    }
}

impl From<&str> for AwardModeFilter {
    fn from(value: &str) -> Self {
        // Trim whitespace and compare case-insensitively
        let lower = value.trim().to_lowercase();

        if MODE_DIRECT_ALIASES.contains(&lower.as_str()) {
            Self::Direct
        } else if MODE_COMPETITION_ALIASES.contains(&lower.as_str()) {
            Self::Competition
        } else {
            // "all", empty, and anything unrecognized select everything.
            Self::All
        }
    }
}

/// Record-kind selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(RecordKind),
}

impl KindFilter {
    pub fn matches(&self, kind: RecordKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => kind == *wanted,
        }
    }
}

impl From<&str> for KindFilter {
    fn from(value: &str) -> Self {
        let lower = value.trim().to_lowercase();

        if KIND_REQUEST_ALIASES.contains(&lower.as_str()) {
            Self::Only(RecordKind::Request)
        } else if KIND_NOTICE_ALIASES.contains(&lower.as_str()) {
            Self::Only(RecordKind::Notice)
        } else if KIND_AUCTION_ALIASES.contains(&lower.as_str()) {
            Self::Only(RecordKind::Auction)
        } else if KIND_CONTRACT_ALIASES.contains(&lower.as_str()) {
            Self::Only(RecordKind::Contract)
        } else if KIND_PAYMENT_ALIASES.contains(&lower.as_str()) {
            Self::Only(RecordKind::Payment)
        } else {
            Self::All
        }
    }
}

/// Current values of every filter control.
///
/// `cpv` is the tip of the taxonomy path (or a directly selected node); `None`
/// means no CPV restriction.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub query: String,
    pub award_mode: AwardModeFilter,
    pub kind: KindFilter,
    pub location: Option<String>,
    pub cpv: Option<CpvNode>,
}

/// Applies every active filter predicate and returns the matching records
/// sorted by date descending (plain string comparison, stable on ties).
///
/// The output is always a subset of `records`, and reapplying the same state
/// yields the same output.
pub fn apply_filters(records: &[Record], filters: &FilterState) -> Vec<Record> {
    let query = filters.query.trim().to_lowercase();
    let location = filters
        .location
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut filtered: Vec<Record> = records
        .iter()
        .filter(|r| {
            let mode = classify_award_mode(r.procedure_type.as_deref());
            if !filters.award_mode.matches(mode) {
                return false;
            }

            if !filters.kind.matches(r.kind) {
                return false;
            }

            if let Some(wanted) = location {
                if r.location.nuts_label.trim() != wanted {
                    return false;
                }
            }

            // Search is plain lowercase substring matching; unlike the
            // classifier it does not strip diacritics.
            if !query.is_empty() && !search_blob(r).contains(&query) {
                return false;
            }

            if let Some(node) = &filters.cpv {
                if !node_matches_record(node, r) {
                    return false;
                }
            }

            true
        })
        .cloned()
        .collect();

    filtered.sort_by(|a, b| b.date.cmp(&a.date));
    filtered
}

/// The text the search predicate runs against: title, organization, reference
/// and protocol numbers, and the free-text location blob, space-joined.
fn search_blob(record: &Record) -> String {
    format!(
        "{} {} {} {} {}",
        record.title,
        record.organization,
        record.reference_number,
        record.protocol_number,
        record.location.text
    )
    .to_lowercase()
}
