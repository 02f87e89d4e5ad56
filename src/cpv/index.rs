use crate::models::{CpvNode, Record};
use std::collections::BTreeMap;

/// Lookup tables over the CPV taxonomy: node by code, and children by parent
/// code sorted lexicographically. Built once at bootstrap and immutable after.
#[derive(Debug, Default)]
pub struct CpvIndex {
    by_code: BTreeMap<String, CpvNode>,
    children_by_parent: BTreeMap<String, Vec<CpvNode>>,
}

impl CpvIndex {
    /// Builds the index from the raw taxonomy list.
    ///
    /// Codes and parent codes are trimmed; nodes with a blank code are
    /// skipped. Duplicate codes keep the last definition in the code lookup.
    /// Children lists are sorted by code so option lists render in a stable
    /// order.
    pub fn build(nodes: &[CpvNode]) -> Self {
        let mut by_code = BTreeMap::new();
        let mut children_by_parent: BTreeMap<String, Vec<CpvNode>> = BTreeMap::new();

        for n in nodes {
            let code = n.code.trim();
            if code.is_empty() {
                continue;
            }
            let node = CpvNode {
                code: code.to_string(),
                parent_code: n.parent_code.trim().to_string(),
                level: n.level,
                label: n.label.clone(),
            };
            by_code.insert(node.code.clone(), node.clone());
            children_by_parent
                .entry(node.parent_code.clone())
                .or_default()
                .push(node);
        }

        for children in children_by_parent.values_mut() {
            children.sort_by(|a, b| a.code.cmp(&b.code));
        }

        Self {
            by_code,
            children_by_parent,
        }
    }

    /// Looks up a node by its exact (trimmed) code.
    pub fn get(&self, code: &str) -> Option<&CpvNode> {
        self.by_code.get(code.trim())
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Returns the selectable children under `parent`, i.e. the nodes whose
    /// parent code matches and whose level is the next one in the
    /// 2→3→4→5→8 sequence. With no parent, returns the level-2 divisions.
    pub fn options_under(&self, parent: Option<&CpvNode>) -> Vec<&CpvNode> {
        let (parent_code, target_level) = match parent {
            Some(node) => (node.code.as_str(), next_level(node.level)),
            None => ("", Some(2)),
        };
        let Some(target_level) = target_level else {
            return Vec::new();
        };

        self.children_by_parent
            .get(parent_code)
            .map(|children| {
                children
                    .iter()
                    .filter(|child| child.level == target_level)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// The CPV depth that follows `level` when drilling down.
///
/// Depths run 2→3→4→5→8; levels 6 and 7 do not exist in the taxonomy, and
/// level 8 (item) is terminal.
pub fn next_level(level: u8) -> Option<u8> {
    match level {
        2 => Some(3),
        3 => Some(4),
        4 => Some(5),
        5 => Some(8),
        _ => None,
    }
}

/// Whether `record` carries at least one CPV tag under `node`.
///
/// Levels 2..5 compare the tag field for that depth exactly. Level 8 matches
/// by prefix because item codes in the data keep their check-digit suffix
/// ("301920001-2" is an item under "30192000"). A record without CPV tags
/// never matches.
pub fn node_matches_record(node: &CpvNode, record: &Record) -> bool {
    if record.cpvs.is_empty() {
        return false;
    }

    let code = node.code.as_str();
    match node.level {
        2 => record.cpvs.iter().any(|c| c.cpv_division == code),
        3 => record.cpvs.iter().any(|c| c.cpv_group == code),
        4 => record.cpvs.iter().any(|c| c.cpv_class == code),
        5 => record.cpvs.iter().any(|c| c.cpv_category == code),
        8 => record.cpvs.iter().any(|c| c.cpv_item.starts_with(code)),
        _ => false,
    }
}
