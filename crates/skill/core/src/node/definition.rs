//! Static skill definitions, as authored in content files.

use core::borrow::Borrow;
use core::fmt;
use std::time::Duration;

use arrayvec::ArrayVec;

use crate::config::SkillConfig;
use crate::graph::SlotIndex;
use crate::stats::Bonus;

/// Unique identifier of a node within its graph.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visual variant of a node; carried for the presentation layer only.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NodeShape {
    #[default]
    Square,
    Circle,
    Diamond,
    Hexagon,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillKind {
    /// Used explicitly; goes through windup, effect and cooldown.
    #[default]
    Active,
    /// Always on once obtained; contributes stat modifiers only.
    Passive,
}

/// Skill point cost of each level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostCurve {
    /// Same cost for every level.
    Flat(u32),
    /// `base + step × (level - 1)`.
    Linear { base: u32, step: u32 },
    /// Explicit per-level costs; levels past the table repeat the last entry.
    Table(Vec<u32>),
}

impl CostCurve {
    /// Cost of acquiring `level` (1-based). Level 0 costs nothing.
    pub fn cost_of(&self, level: u32) -> u32 {
        if level == 0 {
            return 0;
        }
        match self {
            CostCurve::Flat(cost) => *cost,
            CostCurve::Linear { base, step } => base.saturating_add(step.saturating_mul(level - 1)),
            CostCurve::Table(costs) => costs
                .get(level as usize - 1)
                .or(costs.last())
                .copied()
                .unwrap_or(0),
        }
    }

    /// Total cost of levels `1..=level`.
    pub fn cumulative(&self, level: u32) -> u32 {
        let n = u128::from(level);
        let total = match self {
            CostCurve::Flat(cost) => u128::from(*cost) * n,
            // Each term saturates at u32::MAX, so the exact sum clamps the same way.
            CostCurve::Linear { base, step } => {
                u128::from(*base) * n + u128::from(*step) * (n * n.saturating_sub(1) / 2)
            }
            CostCurve::Table(costs) => {
                let listed = costs.len().min(level as usize);
                let prefix: u128 = costs[..listed].iter().map(|&c| u128::from(c)).sum();
                let repeated = n - listed as u128;
                prefix + u128::from(costs.last().copied().unwrap_or(0)) * repeated
            }
        };
        u32::try_from(total).unwrap_or(u32::MAX)
    }
}

impl Default for CostCurve {
    fn default() -> Self {
        CostCurve::Flat(1)
    }
}

/// Conditions that must hold before a node's first level can be acquired.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Requirements {
    /// Nodes that must be obtained (level ≥ 1).
    pub nodes: ArrayVec<NodeKey, { SkillConfig::MAX_PREREQUISITES }>,
    pub player_level: u32,
    /// Minimum points already invested anywhere in the graph.
    pub points_spent: u32,
}

impl Requirements {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn requires(&self, key: &str) -> bool {
        self.nodes.iter().any(|node| node.as_str() == key)
    }
}

/// Resource consumed from the user's stats on each use.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCost {
    pub stat: String,
    pub amount: i32,
}

/// Per-level stat bonus granted while the node is obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: String,
    pub bonus: Bonus,
}

/// Windup, effect and cooldown lengths in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillTiming {
    pub windup_ms: u64,
    pub effect_ms: u64,
    pub cooldown_ms: u64,
}

impl SkillTiming {
    pub const INSTANT: Self = Self {
        windup_ms: 0,
        effect_ms: 0,
        cooldown_ms: 0,
    };

    pub fn windup(&self) -> Duration {
        Duration::from_millis(self.windup_ms)
    }

    pub fn effect(&self) -> Duration {
        Duration::from_millis(self.effect_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// Everything about a skill that does not change during play.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub key: NodeKey,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub slot: SlotIndex,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shape: NodeShape,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: SkillKind,
    pub max_level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: CostCurve,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Requirements,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: SkillTiming,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resource_cost: Option<ResourceCost>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: ArrayVec<StatModifier, { SkillConfig::MAX_MODIFIERS }>,
}

impl SkillDefinition {
    /// Minimal active skill: one point per level, no requirements, instant timing.
    pub fn new(key: impl Into<NodeKey>, slot: SlotIndex, max_level: u32) -> Self {
        let key = key.into();
        Self {
            name: key.to_string(),
            key,
            description: String::new(),
            slot,
            shape: NodeShape::default(),
            kind: SkillKind::default(),
            max_level,
            cost: CostCurve::default(),
            requirements: Requirements::none(),
            timing: SkillTiming::INSTANT,
            resource_cost: None,
            modifiers: ArrayVec::new(),
        }
    }

    pub fn with_cost(mut self, cost: CostCurve) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_kind(mut self, kind: SkillKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_timing(mut self, timing: SkillTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_resource_cost(mut self, stat: impl Into<String>, amount: i32) -> Self {
        self.resource_cost = Some(ResourceCost {
            stat: stat.into(),
            amount,
        });
        self
    }

    /// Adds a prerequisite node. Extra prerequisites beyond capacity are dropped.
    pub fn requires(mut self, key: impl Into<NodeKey>) -> Self {
        let _ = self.requirements.nodes.try_push(key.into());
        self
    }

    pub fn requires_player_level(mut self, level: u32) -> Self {
        self.requirements.player_level = level;
        self
    }

    pub fn requires_points_spent(mut self, points: u32) -> Self {
        self.requirements.points_spent = points;
        self
    }

    /// Adds a stat modifier. Extra modifiers beyond capacity are dropped.
    pub fn with_modifier(mut self, stat: impl Into<String>, bonus: Bonus) -> Self {
        let _ = self.modifiers.try_push(StatModifier {
            stat: stat.into(),
            bonus,
        });
        self
    }
}
