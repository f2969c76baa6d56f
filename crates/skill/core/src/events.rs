//! Observer registry and the events the core publishes.
//!
//! Observers are invoked synchronously, in registration order, on the thread
//! that performed the mutation. There is no queueing at this layer; hosts that
//! need deferred delivery buffer events themselves.

use core::fmt;
use std::time::Duration;

use crate::graph::GraphId;
use crate::node::{NodeKey, NodeState};
use crate::scheduler::UseId;

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

/// Ordered list of callbacks for one event type.
pub struct Observers<E> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Registers a callback. Callbacks run in the order they were registered.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        for (_, callback) in self.entries.iter_mut() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}

/// Events emitted by [`crate::SkillTree`] for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEvent {
    /// A node moved between Locked/Unlocked/Obtained/Maxed.
    NodeStateChanged {
        key: NodeKey,
        previous: NodeState,
        current: NodeState,
    },

    NodeLevelChanged {
        key: NodeKey,
        previous: u32,
        current: u32,
    },

    /// Unspent skill points changed.
    PointsChanged { previous: u32, current: u32 },

    /// Player gained one or more levels.
    LevelUp {
        previous: u32,
        current: u32,
        points_awarded: u32,
    },

    /// Every node level was replaced at once (revert, load, reset).
    GraphReloaded { graph_id: GraphId },

    SkillUsed { use_id: UseId, key: NodeKey },

    /// Emitted every tick while a use is winding up.
    WindupTick {
        use_id: UseId,
        key: NodeKey,
        remaining: Duration,
    },

    WindupComplete { use_id: UseId, key: NodeKey },

    /// The effect became active for `duration`.
    SkillActivated {
        use_id: UseId,
        key: NodeKey,
        duration: Duration,
    },

    /// Emitted every tick while a use is cooling down.
    SkillCooldownTick {
        use_id: UseId,
        key: NodeKey,
        remaining: Duration,
    },

    SkillCompleted { use_id: UseId, key: NodeKey },

    /// Cancelled while winding up; the effect never became active.
    SkillCancelled { use_id: UseId, key: NodeKey },
}
