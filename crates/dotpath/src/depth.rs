use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of levels enumerated from a fresh root.
pub const DEFAULT_DEPTH: usize = 3;

/// Levels a single path lookup may descend before resolving to `unknown`.
pub const RESOLVE_DEPTH: usize = 25;

/// Options controlling path enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Maximum number of concrete segments in an enumerated path.
    pub depth: usize,
    /// Only offer paths whose final segment can be assigned to.
    pub only_writeable: bool,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            only_writeable: false,
        }
    }
}

impl PathConfig {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn writable(mut self) -> Self {
        self.only_writeable = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(Error::InvalidDepth);
        }
        Ok(())
    }
}

/// Remaining recursion allowance.
///
/// Every descent into a nested shape (field, element, tuple position, index
/// value) spends one level. Traversal over self-referential shapes
/// terminates because the budget reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepthBudget(usize);

impl DepthBudget {
    pub fn new(levels: usize) -> Self {
        Self(levels)
    }

    /// A budget starting from the configured depth.
    pub fn fresh(config: &PathConfig) -> Self {
        Self(config.depth)
    }

    pub fn remaining(&self) -> usize {
        self.0
    }

    pub fn is_exhausted(&self) -> bool {
        self.0 == 0
    }

    /// The budget one level further down.
    pub fn descend(&self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}
