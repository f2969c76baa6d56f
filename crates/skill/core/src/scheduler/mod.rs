//! Timed skill execution: windup → active → cooldown → complete.
//!
//! The scheduler is driven externally by [`SkillScheduler::tick`] once per
//! fixed simulation step. Time left over when a phase ends carries into the
//! next phase, so the total lifetime of a use never depends on the step size.
//! Zero-length phases are passed through immediately.

mod error;

pub use error::UseError;

use core::fmt;
use std::time::Duration;

use crate::events::SkillEvent;
use crate::node::{NodeKey, SkillKind, SkillNode};
use crate::stats::{StatId, StatRegistry, StatSnapshot};

/// Identifier of one skill use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseId(pub u32);

impl fmt::Display for UseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UsePhase {
    WindingUp,
    Active,
    OnCooldown,
    Complete,
}

/// One in-flight use of a skill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsedSkill {
    id: UseId,
    key: NodeKey,
    caster: StatSnapshot,
    phase: UsePhase,
    remaining: Duration,
    effect: Duration,
    cooldown: Duration,
    windup: Duration,
    paid: Option<(StatId, i32)>,
}

impl UsedSkill {
    pub fn id(&self) -> UseId {
        self.id
    }

    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    /// The user's stats at cast time, before the resource cost was paid.
    pub fn caster(&self) -> &StatSnapshot {
        &self.caster
    }

    pub fn phase(&self) -> UsePhase {
        self.phase
    }

    /// Time left in the current phase.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Time until this use is complete, across all remaining phases.
    pub fn total_remaining(&self) -> Duration {
        match self.phase {
            UsePhase::WindingUp => self.remaining + self.effect + self.cooldown,
            UsePhase::Active => self.remaining + self.cooldown,
            UsePhase::OnCooldown => self.remaining,
            UsePhase::Complete => Duration::ZERO,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == UsePhase::Complete
    }

    /// Advances by `dt`, transitioning through as many phases as it covers.
    fn advance(&mut self, dt: Duration, events: &mut Vec<SkillEvent>) {
        let mut budget = dt;
        while self.phase != UsePhase::Complete {
            if budget < self.remaining {
                self.remaining -= budget;
                self.report_progress(events);
                return;
            }
            budget -= self.remaining;
            self.remaining = Duration::ZERO;
            self.transition(events);
        }
    }

    fn report_progress(&self, events: &mut Vec<SkillEvent>) {
        let (use_id, key, remaining) = (self.id, self.key.clone(), self.remaining);
        match self.phase {
            UsePhase::WindingUp => events.push(SkillEvent::WindupTick {
                use_id,
                key,
                remaining,
            }),
            UsePhase::OnCooldown => events.push(SkillEvent::SkillCooldownTick {
                use_id,
                key,
                remaining,
            }),
            UsePhase::Active | UsePhase::Complete => {}
        }
    }

    fn transition(&mut self, events: &mut Vec<SkillEvent>) {
        let (use_id, key) = (self.id, self.key.clone());
        match self.phase {
            UsePhase::WindingUp => {
                if !self.windup.is_zero() {
                    events.push(SkillEvent::WindupComplete {
                        use_id,
                        key: key.clone(),
                    });
                }
                events.push(SkillEvent::SkillActivated {
                    use_id,
                    key,
                    duration: self.effect,
                });
                self.phase = UsePhase::Active;
                self.remaining = self.effect;
            }
            UsePhase::Active => {
                self.phase = UsePhase::OnCooldown;
                self.remaining = self.cooldown;
            }
            UsePhase::OnCooldown => {
                if !self.cooldown.is_zero() {
                    events.push(SkillEvent::SkillCooldownTick {
                        use_id,
                        key: key.clone(),
                        remaining: Duration::ZERO,
                    });
                }
                events.push(SkillEvent::SkillCompleted { use_id, key });
                self.phase = UsePhase::Complete;
            }
            UsePhase::Complete => {}
        }
        tracing::trace!("Use {} of '{}' entered {}", self.id, self.key, self.phase);
    }
}

/// Tracks every in-flight skill use and buffers the events they produce.
#[derive(Clone, Debug, Default)]
pub struct SkillScheduler {
    next_id: u32,
    in_flight: Vec<UsedSkill>,
    pending: Vec<SkillEvent>,
}

impl SkillScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a use of `node`, paying its resource cost from `stats`.
    ///
    /// Fails without changing anything if the skill is still cooling down,
    /// the node is not obtained or passive, or the user cannot pay.
    pub fn try_use(&mut self, node: &SkillNode, stats: &mut StatRegistry) -> Result<UseId, UseError> {
        let key = node.key();
        let remaining = self.cooldown_remaining(key.as_str());
        if !remaining.is_zero() {
            return Err(UseError::OnCooldown {
                key: key.clone(),
                remaining,
            });
        }
        if !node.is_obtained() {
            return Err(UseError::PrerequisitesNotObtained(key.clone()));
        }
        if node.kind() == SkillKind::Passive {
            return Err(UseError::PassiveSkill(key.clone()));
        }

        let payment = match &node.definition().resource_cost {
            Some(cost) => {
                let stat = stats.id_of(&cost.stat).ok_or_else(|| UseError::UnknownStat {
                    key: key.clone(),
                    stat: cost.stat.clone(),
                })?;
                let available = stats.current(stat)?;
                if available < cost.amount {
                    return Err(UseError::InsufficientResource {
                        key: key.clone(),
                        stat: cost.stat.clone(),
                        required: cost.amount,
                        available,
                    });
                }
                Some((stat, cost.amount))
            }
            None => None,
        };

        let caster = stats.snapshot();
        if let Some((stat, amount)) = payment {
            stats.modify(stat, -amount)?;
        }

        let id = UseId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let mut used = UsedSkill {
            id,
            key: key.clone(),
            caster,
            phase: UsePhase::WindingUp,
            remaining: node.windup(),
            effect: node.effect_duration(),
            cooldown: node.cooldown(),
            windup: node.windup(),
            paid: payment,
        };

        self.pending.push(SkillEvent::SkillUsed {
            use_id: id,
            key: key.clone(),
        });
        used.advance(Duration::ZERO, &mut self.pending);

        tracing::debug!("Used '{}' as {} ({})", key, id, used.phase);

        if !used.is_complete() {
            self.in_flight.push(used);
        }
        Ok(id)
    }

    /// Cancels a use that is still winding up and refunds its cost.
    pub fn cancel(&mut self, id: UseId, stats: &mut StatRegistry) -> Result<(), UseError> {
        let index = self
            .in_flight
            .iter()
            .position(|used| used.id == id)
            .ok_or(UseError::UnknownUse(id))?;

        let used = &self.in_flight[index];
        if used.phase != UsePhase::WindingUp {
            return Err(UseError::NotCancellable {
                use_id: id,
                phase: used.phase,
            });
        }
        if let Some((stat, amount)) = used.paid {
            stats.modify(stat, amount)?;
        }

        let used = self.in_flight.remove(index);
        tracing::debug!("Cancelled {} of '{}'", id, used.key);
        self.pending.push(SkillEvent::SkillCancelled {
            use_id: id,
            key: used.key,
        });
        Ok(())
    }

    /// Advances every in-flight use by one step and returns all buffered events.
    pub fn tick(&mut self, dt: Duration) -> Vec<SkillEvent> {
        for used in self.in_flight.iter_mut() {
            used.advance(dt, &mut self.pending);
        }
        self.in_flight.retain(|used| !used.is_complete());
        self.drain_events()
    }

    /// Events produced since the last drain, in emission order.
    pub fn drain_events(&mut self) -> Vec<SkillEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Time before `key` can be used again; zero when ready.
    pub fn cooldown_remaining(&self, key: &str) -> Duration {
        self.in_flight
            .iter()
            .filter(|used| used.key.as_str() == key)
            .map(UsedSkill::total_remaining)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    pub fn get(&self, id: UseId) -> Option<&UsedSkill> {
        self.in_flight.iter().find(|used| used.id == id)
    }

    pub fn in_flight(&self) -> &[UsedSkill] {
        &self.in_flight
    }

    /// Drops every in-flight use without refunds or events.
    pub fn clear(&mut self) {
        self.in_flight.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SlotIndex;
    use crate::node::{SkillDefinition, SkillTiming};
    use crate::stats::StatDefinition;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn obtained(definition: SkillDefinition) -> SkillNode {
        let mut node = SkillNode::new(definition);
        node.set_level(1);
        node
    }

    fn timed(windup_ms: u64, effect_ms: u64, cooldown_ms: u64) -> SkillNode {
        obtained(
            SkillDefinition::new("strike", SlotIndex(0), 1).with_timing(SkillTiming {
                windup_ms,
                effect_ms,
                cooldown_ms,
            }),
        )
    }

    fn mana() -> StatRegistry {
        StatRegistry::from_definitions([StatDefinition::new("Mana", "MP")
            .with_bounds(0, 50)
            .with_base(30)])
        .unwrap()
    }

    #[test]
    fn phases_follow_windup_active_cooldown() {
        let node = timed(500, 1000, 2000);
        let mut stats = mana();
        let mut scheduler = SkillScheduler::new();

        let id = scheduler.try_use(&node, &mut stats).unwrap();
        assert_eq!(scheduler.get(id).map(UsedSkill::phase), Some(UsePhase::WindingUp));
        assert_eq!(scheduler.cooldown_remaining("strike"), ms(3500));

        let events = scheduler.tick(ms(250));
        assert!(events.contains(&SkillEvent::WindupTick {
            use_id: id,
            key: "strike".into(),
            remaining: ms(250),
        }));

        let events = scheduler.tick(ms(250));
        assert!(events.contains(&SkillEvent::WindupComplete {
            use_id: id,
            key: "strike".into(),
        }));
        assert_eq!(scheduler.get(id).map(UsedSkill::phase), Some(UsePhase::Active));

        scheduler.tick(ms(1500));
        let used = scheduler.get(id).unwrap();
        assert_eq!(used.phase(), UsePhase::OnCooldown);
        assert_eq!(used.remaining(), ms(1500));

        let events = scheduler.tick(ms(1500));
        assert_eq!(
            events.last(),
            Some(&SkillEvent::SkillCompleted {
                use_id: id,
                key: "strike".into()
            })
        );
        assert!(scheduler.in_flight().is_empty());
    }

    #[test]
    fn zero_windup_activates_immediately() {
        let node = timed(0, 1000, 0);
        let mut stats = mana();
        let mut scheduler = SkillScheduler::new();

        let id = scheduler.try_use(&node, &mut stats).unwrap();
        let events = scheduler.drain_events();

        assert_eq!(scheduler.get(id).map(UsedSkill::phase), Some(UsePhase::Active));
        assert!(!events
            .iter()
            .any(|event| matches!(event, SkillEvent::WindupComplete { .. })));
    }

    #[test]
    fn on_cooldown_rejects_without_side_effects() {
        let node = obtained(
            SkillDefinition::new("bolt", SlotIndex(0), 1)
                .with_timing(SkillTiming {
                    cooldown_ms: 2000,
                    ..SkillTiming::INSTANT
                })
                .with_resource_cost("mp", 10),
        );
        let mut stats = mana();
        let mut scheduler = SkillScheduler::new();

        scheduler.try_use(&node, &mut stats).unwrap();
        scheduler.tick(ms(1000));
        let before = stats.snapshot();

        assert_eq!(
            scheduler.try_use(&node, &mut stats),
            Err(UseError::OnCooldown {
                key: "bolt".into(),
                remaining: ms(1000)
            })
        );
        assert_eq!(stats.snapshot(), before);
        assert!(scheduler.drain_events().is_empty());
    }

    #[test]
    fn resource_cost_is_checked_and_paid() {
        let node = obtained(
            SkillDefinition::new("nova", SlotIndex(0), 1).with_resource_cost("Mana", 20),
        );
        let mut stats = mana();
        let mut scheduler = SkillScheduler::new();
        let mp = stats.resolve("mp").unwrap();

        let id = scheduler.try_use(&node, &mut stats).unwrap();
        assert_eq!(stats.current(mp), Ok(10));
        assert!(scheduler.get(id).is_none());

        assert_eq!(
            scheduler.try_use(&node, &mut stats),
            Err(UseError::InsufficientResource {
                key: "nova".into(),
                stat: "Mana".into(),
                required: 20,
                available: 10,
            })
        );
    }

    #[test]
    fn cast_snapshot_precedes_payment() {
        let node = obtained(
            SkillDefinition::new("nova", SlotIndex(0), 1)
                .with_timing(SkillTiming {
                    effect_ms: 100,
                    ..SkillTiming::INSTANT
                })
                .with_resource_cost("mp", 5),
        );
        let mut stats = mana();
        let mut scheduler = SkillScheduler::new();

        let id = scheduler.try_use(&node, &mut stats).unwrap();
        assert_eq!(
            scheduler.get(id).and_then(|used| used.caster().get("Mana")),
            Some(30)
        );
    }

    #[test]
    fn unobtained_and_passive_skills_are_rejected() {
        let mut stats = mana();
        let mut scheduler = SkillScheduler::new();

        let locked = SkillNode::new(SkillDefinition::new("a", SlotIndex(0), 1));
        assert_eq!(
            scheduler.try_use(&locked, &mut stats),
            Err(UseError::PrerequisitesNotObtained("a".into()))
        );

        let passive =
            obtained(SkillDefinition::new("p", SlotIndex(0), 1).with_kind(SkillKind::Passive));
        assert_eq!(
            scheduler.try_use(&passive, &mut stats),
            Err(UseError::PassiveSkill("p".into()))
        );
    }

    #[test]
    fn cancel_during_windup_refunds() {
        let node = obtained(
            SkillDefinition::new("nova", SlotIndex(0), 1)
                .with_timing(SkillTiming {
                    windup_ms: 1000,
                    effect_ms: 500,
                    cooldown_ms: 500,
                })
                .with_resource_cost("mp", 10),
        );
        let mut stats = mana();
        let mut scheduler = SkillScheduler::new();
        let mp = stats.resolve("mp").unwrap();

        let id = scheduler.try_use(&node, &mut stats).unwrap();
        assert_eq!(stats.current(mp), Ok(20));

        scheduler.cancel(id, &mut stats).unwrap();
        assert_eq!(stats.current(mp), Ok(30));
        assert!(scheduler.get(id).is_none());
        assert_eq!(scheduler.cooldown_remaining("nova"), Duration::ZERO);
        assert!(!scheduler
            .drain_events()
            .iter()
            .any(|event| matches!(event, SkillEvent::SkillActivated { .. })));

        let id = scheduler.try_use(&node, &mut stats).unwrap();
        scheduler.tick(ms(1000));
        assert_eq!(
            scheduler.cancel(id, &mut stats),
            Err(UseError::NotCancellable {
                use_id: id,
                phase: UsePhase::Active
            })
        );
        assert_eq!(
            scheduler.cancel(UseId(99), &mut stats),
            Err(UseError::UnknownUse(UseId(99)))
        );
    }

    #[test]
    fn large_step_crosses_several_phases() {
        let node = timed(100, 100, 100);
        let mut stats = mana();
        let mut scheduler = SkillScheduler::new();

        let id = scheduler.try_use(&node, &mut stats).unwrap();
        scheduler.drain_events();
        let events = scheduler.tick(ms(1000));

        assert_eq!(
            events,
            vec![
                SkillEvent::WindupComplete {
                    use_id: id,
                    key: "strike".into()
                },
                SkillEvent::SkillActivated {
                    use_id: id,
                    key: "strike".into(),
                    duration: ms(100)
                },
                SkillEvent::SkillCooldownTick {
                    use_id: id,
                    key: "strike".into(),
                    remaining: Duration::ZERO
                },
                SkillEvent::SkillCompleted {
                    use_id: id,
                    key: "strike".into()
                },
            ]
        );
    }
}
