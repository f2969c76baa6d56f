//! Change tracking between two views of a graph.
//!
//! Operations never emit events directly. The tree captures [`NodeView`]s
//! before and after an operation, diffs them into a [`GraphDelta`], and
//! turns the delta into [`SkillEvent`]s. This keeps cascades (one downgrade
//! depleting several dependents, an upgrade unlocking neighbours) reported
//! without every code path having to remember to notify.

use bitflags::bitflags;

use crate::events::SkillEvent;
use crate::node::{NodeKey, NodeState};

bitflags! {
    /// Tracks which fields of a node changed during an operation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeFields: u8 {
        const LEVEL = 1 << 0;
        const STATE = 1 << 1;
    }
}

/// Observable state of one node at one instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeView {
    pub key: NodeKey,
    pub level: u32,
    pub state: NodeState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeChange {
    pub key: NodeKey,
    pub fields: NodeFields,
    pub previous_level: u32,
    pub level: u32,
    pub previous_state: NodeState,
    pub state: NodeState,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphDelta {
    pub nodes: Vec<NodeChange>,
    /// `(previous, current)` unspent points, if they changed.
    pub points: Option<(u32, u32)>,
}

impl GraphDelta {
    /// Diffs two view lists taken from the same graph (same node order).
    pub fn between(
        before: &[NodeView],
        after: &[NodeView],
        points_before: u32,
        points_after: u32,
    ) -> Self {
        let nodes = before
            .iter()
            .zip(after)
            .filter_map(|(old, new)| {
                let mut fields = NodeFields::empty();
                if old.level != new.level {
                    fields |= NodeFields::LEVEL;
                }
                if old.state != new.state {
                    fields |= NodeFields::STATE;
                }
                (!fields.is_empty()).then(|| NodeChange {
                    key: new.key.clone(),
                    fields,
                    previous_level: old.level,
                    level: new.level,
                    previous_state: old.state,
                    state: new.state,
                })
            })
            .collect();

        Self {
            nodes,
            points: (points_before != points_after).then_some((points_before, points_after)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.points.is_none()
    }

    /// Events in node order: level change before state change, points last.
    pub fn events(&self) -> Vec<SkillEvent> {
        let mut events = Vec::with_capacity(self.nodes.len() * 2 + 1);
        for change in &self.nodes {
            if change.fields.contains(NodeFields::LEVEL) {
                events.push(SkillEvent::NodeLevelChanged {
                    key: change.key.clone(),
                    previous: change.previous_level,
                    current: change.level,
                });
            }
            if change.fields.contains(NodeFields::STATE) {
                events.push(SkillEvent::NodeStateChanged {
                    key: change.key.clone(),
                    previous: change.previous_state,
                    current: change.state,
                });
            }
        }
        if let Some((previous, current)) = self.points {
            events.push(SkillEvent::PointsChanged { previous, current });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(key: &str, level: u32, state: NodeState) -> NodeView {
        NodeView {
            key: key.into(),
            level,
            state,
        }
    }

    #[test]
    fn unchanged_views_produce_empty_delta() {
        let views = vec![view("a", 0, NodeState::Unlocked)];
        let delta = GraphDelta::between(&views, &views, 3, 3);
        assert!(delta.is_empty());
        assert!(delta.events().is_empty());
    }

    #[test]
    fn level_and_state_changes_are_flagged() {
        let before = vec![
            view("a", 0, NodeState::Unlocked),
            view("b", 0, NodeState::Locked),
        ];
        let after = vec![
            view("a", 1, NodeState::Obtained),
            view("b", 0, NodeState::Unlocked),
        ];

        let delta = GraphDelta::between(&before, &after, 3, 2);

        assert_eq!(delta.nodes.len(), 2);
        assert_eq!(delta.nodes[0].fields, NodeFields::LEVEL | NodeFields::STATE);
        assert_eq!(delta.nodes[1].fields, NodeFields::STATE);
        assert_eq!(
            delta.events().last(),
            Some(&SkillEvent::PointsChanged {
                previous: 3,
                current: 2
            })
        );
        assert_eq!(delta.events().len(), 4);
    }
}
