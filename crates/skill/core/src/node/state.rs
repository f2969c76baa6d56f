/// Progression state of a node, derived from its level and requirements.
///
/// ```text
/// Locked ──requirements met──▶ Unlocked ──spend points──▶ Obtained ──max level──▶ Maxed
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NodeState {
    Locked,
    Unlocked,
    Obtained,
    Maxed,
}

impl NodeState {
    /// Derives the state. Level wins over requirements: an obtained node
    /// stays obtained even if a requirement later stops holding.
    pub fn derive(level: u32, max_level: u32, requirements_met: bool) -> Self {
        if level >= max_level {
            NodeState::Maxed
        } else if level >= 1 {
            NodeState::Obtained
        } else if requirements_met {
            NodeState::Unlocked
        } else {
            NodeState::Locked
        }
    }

    /// Obtained or higher.
    pub const fn is_obtained(self) -> bool {
        matches!(self, NodeState::Obtained | NodeState::Maxed)
    }

    /// Can take another level, given enough points.
    pub const fn is_upgradable(self) -> bool {
        matches!(self, NodeState::Unlocked | NodeState::Obtained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_follows_level_first() {
        assert_eq!(NodeState::derive(0, 3, false), NodeState::Locked);
        assert_eq!(NodeState::derive(0, 3, true), NodeState::Unlocked);
        assert_eq!(NodeState::derive(1, 3, false), NodeState::Obtained);
        assert_eq!(NodeState::derive(3, 3, true), NodeState::Maxed);
        assert!(NodeState::Maxed.is_obtained());
        assert!(!NodeState::Unlocked.is_obtained());
    }
}
