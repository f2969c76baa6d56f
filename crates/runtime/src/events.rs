//! Queued delivery of core notifications.
//!
//! Core observers run synchronously inside the mutating call. The runtime
//! subscribes one observer per source that pushes into a shared queue, and the
//! presentation layer drains it once per frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use skill_core::{SkillEvent, StatEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Node levels, states, points and reloads
    Progression,
    /// Skill use lifecycle and timers
    Execution,
    /// Stat bound crossings
    Stats,
}

/// Event wrapper that carries the source and typed event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    Skill(SkillEvent),
    Stat(StatEvent),
}

impl RuntimeEvent {
    pub fn topic(&self) -> Topic {
        match self {
            RuntimeEvent::Skill(event) => match event {
                SkillEvent::NodeStateChanged { .. }
                | SkillEvent::NodeLevelChanged { .. }
                | SkillEvent::PointsChanged { .. }
                | SkillEvent::LevelUp { .. }
                | SkillEvent::GraphReloaded { .. } => Topic::Progression,
                SkillEvent::SkillUsed { .. }
                | SkillEvent::WindupTick { .. }
                | SkillEvent::WindupComplete { .. }
                | SkillEvent::SkillActivated { .. }
                | SkillEvent::SkillCooldownTick { .. }
                | SkillEvent::SkillCompleted { .. }
                | SkillEvent::SkillCancelled { .. } => Topic::Execution,
            },
            RuntimeEvent::Stat(_) => Topic::Stats,
        }
    }
}

/// Shared FIFO of runtime events.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventQueue {
    inner: Rc<RefCell<VecDeque<RuntimeEvent>>>,
}

impl EventQueue {
    pub(crate) fn push(&self, event: RuntimeEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub(crate) fn drain(&self) -> Vec<RuntimeEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    /// Removes and returns only events of `topic`, keeping the rest queued.
    pub(crate) fn drain_topic(&self, topic: Topic) -> Vec<RuntimeEvent> {
        let mut queue = self.inner.borrow_mut();
        let (matching, rest): (VecDeque<_>, VecDeque<_>) =
            queue.drain(..).partition(|event| event.topic() == topic);
        *queue = rest;
        matching.into()
    }
}
