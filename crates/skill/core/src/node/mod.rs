//! A single upgradeable skill and its leveling rules.
//!
//! A [`SkillNode`] pairs an immutable [`SkillDefinition`] with the mutable
//! level. Rules that need the rest of the graph (prerequisites, dependents,
//! points spent) live in [`crate::graph::SkillGraph`]; this module only knows
//! about one node.
//!
//! Invariant: `0 ≤ level ≤ max_level`.

mod definition;
mod error;
mod state;

pub use definition::{
    CostCurve, NodeKey, NodeShape, Requirements, ResourceCost, SkillDefinition, SkillKind,
    SkillTiming, StatModifier,
};
pub use error::{NodeError, UnmetRequirement};
pub use state::NodeState;

use std::time::Duration;

use crate::graph::SlotIndex;
use crate::stats::StatBonuses;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillNode {
    definition: SkillDefinition,
    level: u32,
}

impl SkillNode {
    pub fn new(definition: SkillDefinition) -> Self {
        Self {
            definition,
            level: 0,
        }
    }

    pub fn key(&self) -> &NodeKey {
        &self.definition.key
    }

    pub fn definition(&self) -> &SkillDefinition {
        &self.definition
    }

    pub fn slot(&self) -> SlotIndex {
        self.definition.slot
    }

    pub fn kind(&self) -> SkillKind {
        self.definition.kind
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.definition.max_level
    }

    pub fn is_obtained(&self) -> bool {
        self.level >= 1
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.definition.max_level
    }

    /// State given whether the node's requirements currently hold.
    pub fn state(&self, requirements_met: bool) -> NodeState {
        NodeState::derive(self.level, self.definition.max_level, requirements_met)
    }

    /// Cost of the next level, `None` when maxed.
    pub fn next_cost(&self) -> Option<u32> {
        (!self.is_maxed()).then(|| self.definition.cost.cost_of(self.level + 1))
    }

    /// Cost paid for the current level (refunded by a downgrade).
    pub fn current_cost(&self) -> u32 {
        self.definition.cost.cost_of(self.level)
    }

    /// Points invested across all acquired levels.
    pub fn invested(&self) -> u32 {
        self.definition.cost.cumulative(self.level)
    }

    pub fn windup(&self) -> Duration {
        self.definition.timing.windup()
    }

    pub fn effect_duration(&self) -> Duration {
        self.definition.timing.effect()
    }

    pub fn cooldown(&self) -> Duration {
        self.definition.timing.cooldown()
    }

    /// Adds this node's modifiers, scaled by level, to `bonuses`.
    pub fn collect_bonuses(&self, bonuses: &mut StatBonuses) {
        if !self.is_obtained() {
            return;
        }
        for modifier in &self.definition.modifiers {
            bonuses.add(&modifier.stat, modifier.bonus.scaled(self.level));
        }
    }

    pub(crate) fn raise(&mut self) {
        debug_assert!(!self.is_maxed());
        self.level += 1;
    }

    pub(crate) fn lower(&mut self) {
        debug_assert!(self.level > 0);
        self.level -= 1;
    }

    /// Sets the level, clamped into `[0, max_level]`. Returns the applied level.
    pub(crate) fn set_level(&mut self, level: u32) -> u32 {
        self.level = level.min(self.definition.max_level);
        self.level
    }
}
