use crate::cpv::index::CpvIndex;
use crate::errors::{AppError, AppResult};
use crate::models::CpvNode;

/// Drill-down state for the CPV taxonomy: a stack of nodes forming a
/// parent→child chain whose levels strictly increase along 2→3→4→5→8.
///
/// The chain invariant holds because [`CpvPath::descend`] only accepts codes
/// from the current option list; there is no way to push an arbitrary node.
#[derive(Debug, Default)]
pub struct CpvPath {
    stack: Vec<CpvNode>,
}

impl CpvPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node the user is currently positioned on, if any.
    pub fn current(&self) -> Option<&CpvNode> {
        self.stack.last()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn nodes(&self) -> &[CpvNode] {
        &self.stack
    }

    /// The selectable children at the current position.
    pub fn options<'a>(&self, index: &'a CpvIndex) -> Vec<&'a CpvNode> {
        index.options_under(self.current())
    }

    /// Pushes the child with the given code onto the path.
    ///
    /// The code must be one of the current options; anything else returns
    /// `CpvSelectionError` listing what was selectable.
    pub fn descend(&mut self, index: &CpvIndex, code: &str) -> AppResult<()> {
        let code = code.trim();
        let options = self.options(index);
        match options.iter().find(|n| n.code == code) {
            Some(node) => {
                let node = (*node).clone();
                self.stack.push(node);
                Ok(())
            }
            None => Err(AppError::CpvSelectionError {
                code: code.to_string(),
                available: options
                    .iter()
                    .map(|n| n.code.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Pops one level, returning the node that was left.
    pub fn ascend(&mut self) -> Option<CpvNode> {
        self.stack.pop()
    }

    /// Clears the path back to the taxonomy root.
    pub fn reset(&mut self) {
        self.stack.clear();
    }

    /// "Root" or the codes along the path joined with " > ".
    pub fn breadcrumb(&self) -> String {
        if self.stack.is_empty() {
            return "Root".to_string();
        }
        self.stack
            .iter()
            .map(|n| n.code.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}
