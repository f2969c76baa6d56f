use crate::progression::LevelCurve;

/// What happens when a downgrade would leave dependents without their prerequisite.
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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DowngradePolicy {
    /// Refuse the downgrade while any dependent is still obtained.
    #[default]
    Block,
    /// Deplete every obtained dependent (recursively) and refund its points.
    Cascade,
}

/// Skill tree rules and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillConfig {
    /// Whether players may refund individual levels.
    pub allow_downgrade: bool,
    /// Policy applied when a node drops back to level 0.
    pub downgrade_policy: DowngradePolicy,
    /// Skill points awarded per player level gained.
    pub points_per_level: u32,
    /// Unspent points a fresh progression starts with.
    pub starting_points: u32,
    pub level_curve: LevelCurve,
}

impl SkillConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of prerequisite nodes per skill.
    pub const MAX_PREREQUISITES: usize = 8;
    /// Maximum number of stat modifiers per skill.
    pub const MAX_MODIFIERS: usize = 4;
    /// Maximum grid cells (width × height) of a single graph.
    pub const MAX_GRID_CELLS: usize = 1024;
    /// Highest `max_level` a single node may declare.
    pub const MAX_NODE_LEVEL: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_POINTS_PER_LEVEL: u32 = 1;
    pub const DEFAULT_STARTING_POINTS: u32 = 0;

    pub fn new() -> Self {
        Self {
            allow_downgrade: false,
            downgrade_policy: DowngradePolicy::default(),
            points_per_level: Self::DEFAULT_POINTS_PER_LEVEL,
            starting_points: Self::DEFAULT_STARTING_POINTS,
            level_curve: LevelCurve::default(),
        }
    }

    /// Config that permits downgrades under the given policy.
    pub fn with_downgrades(policy: DowngradePolicy) -> Self {
        Self {
            allow_downgrade: true,
            downgrade_policy: policy,
            ..Self::new()
        }
    }
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self::new()
    }
}
