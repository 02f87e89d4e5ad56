// Dataset file names (produced by the offline build step)
pub const MANIFEST_FILE: &str = "records_manifest.json";
pub const CPV_NODES_FILE: &str = "cpv_nodes.json";

// Pagination
pub const DEFAULT_PAGE_SIZE: usize = 200;

// Award-mode classification tokens. The Greek pair must both appear in the
// normalized procedure type; the English phrase matches on its own.
pub const DIRECT_TOKEN: &str = "απευθειας";
pub const ASSIGNMENT_TOKEN: &str = "αναθεσ";
pub const DIRECT_AWARD_PHRASE: &str = "direct award";

// CPV depth sequence: division, group, class, category, item.
// Levels 6 and 7 do not exist in the taxonomy.
pub const CPV_LEVELS: &[u8] = &[2, 3, 4, 5, 8];

// Record kind aliases (CLI selector values)
pub const KIND_REQUEST_ALIASES: &[&str] = &["request", "req"];
pub const KIND_NOTICE_ALIASES: &[&str] = &["notice", "not"];
pub const KIND_AUCTION_ALIASES: &[&str] = &["auction", "auc"];
pub const KIND_CONTRACT_ALIASES: &[&str] = &["contract", "con"];
pub const KIND_PAYMENT_ALIASES: &[&str] = &["payment", "pay"];

// Award-mode aliases (CLI selector values)
pub const MODE_DIRECT_ALIASES: &[&str] = &["direct", "dir"];
pub const MODE_COMPETITION_ALIASES: &[&str] = &["competition", "comp"];

// Message shown when the dataset cannot be loaded
pub const DATA_LOAD_FAILURE_MSG: &str =
    "Failed to load the dataset. Regenerate the data files with the build step and try again.";
