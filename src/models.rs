use serde::{Deserialize, Serialize};

/// Stage of a procurement record in the dataset.
///
/// Chunk files store the stage as a lowercase string. Values outside the known
/// set deserialize to [`RecordKind::Other`] so a single odd record never aborts
/// a chunk load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Request,
    Notice,
    Auction,
    Contract,
    Payment,
    #[serde(other)]
    Other,
}

impl Default for RecordKind {
    fn default() -> Self {
        Self::Other
    }
}

impl RecordKind {
    /// Returns a human-readable stage label for result cards.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Request => "Request",
            Self::Notice => "Notice",
            Self::Auction => "Auction",
            Self::Contract => "Contract",
            Self::Payment => "Payment",
            Self::Other => "-",
        }
    }
}

/// Location block attached to a record. All fields are optional in the data;
/// missing values deserialize to empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub nuts_label: String,
    pub city: String,
    pub postal_code: String,
    /// Free-text location blob, used only by the search predicate.
    pub text: String,
}

/// One CPV tag on a record, pre-split by the build step into the code for each
/// taxonomy depth. `cpv_item` keeps the full item code including the check
/// digit suffix (e.g. "301920001-2").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CpvTag {
    pub cpv_item: String,
    pub cpv_division: String,
    pub cpv_group: String,
    pub cpv_class: String,
    pub cpv_category: String,
}

/// A procurement event as stored in the chunk files.
///
/// Every field is defaulted: individual records are allowed to be sparse or
/// malformed and degrade to placeholders at render time instead of failing the
/// load. Records are immutable once loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub kind: RecordKind,
    pub title: String,
    /// ISO-style date string; ordering relies on plain string comparison.
    pub date: String,
    #[serde(rename = "referenceNumber")]
    pub reference_number: String,
    #[serde(rename = "protocolNumber")]
    pub protocol_number: String,
    pub organization: String,
    /// Free-text procedure type, input to award-mode classification.
    #[serde(rename = "procedureType")]
    pub procedure_type: Option<String>,
    #[serde(rename = "contractType")]
    pub contract_type: String,
    pub amount_num: f64,
    pub pdf_url: Option<String>,
    pub location: Location,
    /// Ordered CPV tags; may be empty.
    pub cpvs: Vec<CpvTag>,
}

/// A CPV taxonomy entry. `level` is one of {2, 3, 4, 5, 8} for
/// division/group/class/category/item; `parent_code` is empty for divisions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CpvNode {
    pub code: String,
    pub parent_code: String,
    pub level: u8,
    pub label: String,
}

/// Manifest describing the record chunk files, in load order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub chunks: Vec<ChunkRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkRef {
    pub file: String,
}
