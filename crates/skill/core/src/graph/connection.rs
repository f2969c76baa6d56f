use super::definition::SlotIndex;

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
pub enum ConnectionDirection {
    #[default]
    OneWay,
    TwoWay,
}

/// Edge between two occupied slots.
///
/// Connections are drawn by the UI and walked by traversal helpers; they do
/// not gate progression. Prerequisites are declared on the node itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillConnection {
    pub from: SlotIndex,
    pub to: SlotIndex,
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: ConnectionDirection,
}

impl SkillConnection {
    pub const fn one_way(from: SlotIndex, to: SlotIndex) -> Self {
        Self {
            from,
            to,
            direction: ConnectionDirection::OneWay,
        }
    }

    pub const fn two_way(a: SlotIndex, b: SlotIndex) -> Self {
        Self {
            from: a,
            to: b,
            direction: ConnectionDirection::TwoWay,
        }
    }

    /// The slot reachable from `slot` along this edge, if any.
    pub fn leads_from(&self, slot: SlotIndex) -> Option<SlotIndex> {
        if self.from == slot {
            Some(self.to)
        } else if self.to == slot && self.direction == ConnectionDirection::TwoWay {
            Some(self.from)
        } else {
            None
        }
    }
}
