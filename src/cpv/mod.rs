//! CPV (Common Procurement Vocabulary) taxonomy navigation.
//!
//! The taxonomy is a tree of coded nodes at depths 2/3/4/5/8
//! (division/group/class/category/item). [`CpvIndex`] holds the lookup tables,
//! [`CpvPath`] is the drill-down state, and [`node_matches_record`] decides
//! whether a record carries a tag under a selected node.

mod index;
mod path;

// Re-export public API
pub use index::{next_level, node_matches_record, CpvIndex};
pub use path::CpvPath;
