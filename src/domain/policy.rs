//! Tree level policy: how deep the filter tree is built, and which levels are
//! disabled or multi-selectable.
//!
//! `disabled` and `multi_select` are signed depth budgets. A positive value is
//! active for that many more levels; a negative value is inactive for that many
//! levels and then becomes active (inverted selection). Each descent moves the
//! value one step toward the boundary, where [`FlipPolicy`] decides what happens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Hard ceiling for `build_tree`, regardless of configuration.
pub const MAX_BUILD_TREE: u32 = 32;

/// Behavior of a level budget when it reaches `1` or `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipPolicy {
    /// `1 → -1` and `-1 → 1`: the budget crosses into the opposite regime.
    #[default]
    Cross,
    /// `1 → 0` and `-1 → 0`: the regime ends and never flips.
    Collapse,
}

impl fmt::Display for FlipPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlipPolicy::Cross => f.write_str("cross"),
            FlipPolicy::Collapse => f.write_str("collapse"),
        }
    }
}

impl FromStr for FlipPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cross" => Ok(FlipPolicy::Cross),
            "collapse" => Ok(FlipPolicy::Collapse),
            other => Err(format!("unknown flip policy: {other}")),
        }
    }
}

/// Signed depth budget for one tree level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeLevel(i32);

impl TreeLevel {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn is_enabled(self) -> bool {
        self.0 > 0
    }

    /// Level value for the next tree level down.
    pub fn advance(self, flip: FlipPolicy) -> Self {
        let next = match (self.0, flip) {
            (v, _) if v > 1 => v - 1,
            (v, _) if v < -1 => v + 1,
            (1, FlipPolicy::Cross) => -1,
            (-1, FlipPolicy::Cross) => 1,
            (1 | -1, FlipPolicy::Collapse) => 0,
            _ => 0,
        };
        Self(next)
    }
}

/// The triad of depth budgets for one node, plus the flip rule applied on descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLevelPolicy {
    pub build_tree: u32,
    pub disabled: TreeLevel,
    pub multi_select: TreeLevel,
    pub flip: FlipPolicy,
}

impl TreeLevelPolicy {
    /// Root policy; `build_tree` is clamped to [`MAX_BUILD_TREE`].
    pub fn new(build_tree: u32, disabled: i32, multi_select: i32, flip: FlipPolicy) -> Self {
        let build_tree = if build_tree > MAX_BUILD_TREE {
            warn!(
                "build_tree {} exceeds ceiling, clamping to {}",
                build_tree, MAX_BUILD_TREE
            );
            MAX_BUILD_TREE
        } else {
            build_tree
        };
        Self {
            build_tree,
            disabled: TreeLevel::new(disabled),
            multi_select: TreeLevel::new(multi_select),
            flip,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.is_enabled()
    }

    pub fn is_multi_select(&self) -> bool {
        self.multi_select.is_enabled()
    }

    pub fn can_descend(&self) -> bool {
        self.build_tree > 0
    }

    /// Policy for the children of a node built with this policy.
    pub fn descend(&self) -> Self {
        Self {
            build_tree: self.build_tree.saturating_sub(1),
            disabled: self.disabled.advance(self.flip),
            multi_select: self.multi_select.advance(self.flip),
            flip: self.flip,
        }
    }
}
