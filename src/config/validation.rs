// Author: Dustin Pilgrim
// License: MIT

use super::*;
use crate::resolver::NodeRef;

impl Document {
    /// Every value node whose raw text failed to parse, in file order,
    /// paired with its full dotted path.
    pub fn errors(&self) -> Vec<(String, &TomlError)> {
        let mut out: Vec<(String, &TomlError)> = self
            .reachable()
            .filter_map(|id| {
                let node = NodeRef::new(self, id);
                node.error().map(|e| (node.full_name(), e))
            })
            .collect();
        out.sort_by_key(|(_, e)| e.line());
        out
    }

    /// Strict mode: fails with the first value error, if any.
    pub fn validate(&self) -> Result<(), TomlError> {
        match self.errors().into_iter().next() {
            Some((_, e)) => Err(e.clone()),
            None => Ok(()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
}
