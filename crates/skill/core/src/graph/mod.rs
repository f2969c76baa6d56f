//! The skill graph: a fixed grid of node slots plus connections.
//!
//! [`SkillGraph`] owns every [`SkillNode`] and enforces the cross-node rules:
//! prerequisites, points-spent thresholds and the downgrade policy for
//! dependents. Grid positions are unique and never change after construction.

mod connection;
mod definition;
mod delta;
mod error;

pub use connection::{ConnectionDirection, SkillConnection};
pub use definition::{GraphDefinition, GraphId, SlotIndex};
pub use delta::{GraphDelta, NodeChange, NodeFields, NodeView};
pub use error::GraphError;

use std::collections::{BTreeMap, HashMap};

use crate::config::{DowngradePolicy, SkillConfig};
use crate::node::{NodeError, NodeKey, NodeState, SkillNode, UnmetRequirement};
use crate::progression::Progression;
use crate::stats::StatBonuses;

/// DFS marks for cycle detection.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    New,
    Active,
    Done,
}

#[derive(Clone, Debug)]
pub struct SkillGraph {
    id: GraphId,
    width: u16,
    height: u16,
    slots: Vec<Option<SkillNode>>,
    keys: HashMap<NodeKey, SlotIndex>,
    connections: Vec<SkillConnection>,
}

impl SkillGraph {
    /// Builds and validates a graph. All nodes start at level 0.
    pub fn from_definition(definition: GraphDefinition) -> Result<Self, GraphError> {
        let GraphDefinition {
            id,
            width,
            height,
            nodes,
            connections,
        } = definition;

        let cells = usize::from(width) * usize::from(height);
        if cells == 0 || cells > SkillConfig::MAX_GRID_CELLS {
            return Err(GraphError::InvalidDimensions { width, height });
        }

        let mut slots: Vec<Option<SkillNode>> = vec![None; cells];
        let mut keys = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let slot = node.slot;
            if slot.index() >= cells {
                return Err(GraphError::SlotIndexOutOfRange { slot, cells });
            }
            if node.max_level == 0 || node.max_level > SkillConfig::MAX_NODE_LEVEL {
                return Err(GraphError::InvalidMaxLevel(node.key));
            }
            if let Some(level) = (1..=node.max_level).find(|&level| node.cost.cost_of(level) == 0)
            {
                return Err(GraphError::ZeroCost {
                    key: node.key,
                    level,
                });
            }
            if keys.contains_key(&node.key) {
                return Err(GraphError::DuplicateKey(node.key));
            }
            if let Some(existing) = &slots[slot.index()] {
                return Err(GraphError::SlotOccupied {
                    slot,
                    existing: existing.key().clone(),
                    key: node.key,
                });
            }

            keys.insert(node.key.clone(), slot);
            slots[slot.index()] = Some(SkillNode::new(node));
        }

        for node in slots.iter().flatten() {
            for prerequisite in &node.definition().requirements.nodes {
                if !keys.contains_key(prerequisite) {
                    return Err(GraphError::UnknownPrerequisite {
                        key: node.key().clone(),
                        prerequisite: prerequisite.clone(),
                    });
                }
            }
        }

        for connection in &connections {
            if connection.from == connection.to {
                return Err(GraphError::SelfConnection(connection.from));
            }
            for slot in [connection.from, connection.to] {
                match slots.get(slot.index()) {
                    None => return Err(GraphError::SlotIndexOutOfRange { slot, cells }),
                    Some(None) => return Err(GraphError::EmptySlot(slot)),
                    Some(Some(_)) => {}
                }
            }
        }

        let graph = Self {
            id,
            width,
            height,
            slots,
            keys,
            connections,
        };
        graph.check_acyclic()?;

        tracing::debug!(
            "Built skill graph '{}' ({}x{}, {} nodes, {} connections)",
            graph.id,
            graph.width,
            graph.height,
            graph.node_count(),
            graph.connections.len()
        );

        Ok(graph)
    }

    pub fn id(&self) -> &GraphId {
        &self.id
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.slots.len()
    }

    /// Occupied cells: `width × height` minus empty slots.
    pub fn node_count(&self) -> usize {
        self.keys.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    pub fn node(&self, key: &str) -> Option<&SkillNode> {
        let slot = self.keys.get(key)?;
        self.slots.get(slot.index())?.as_ref()
    }

    /// Node at a grid cell; `Ok(None)` for an empty cell.
    pub fn node_at(&self, slot: SlotIndex) -> Result<Option<&SkillNode>, GraphError> {
        self.slots
            .get(slot.index())
            .map(Option::as_ref)
            .ok_or(GraphError::SlotIndexOutOfRange {
                slot,
                cells: self.slots.len(),
            })
    }

    pub fn slot_at(&self, x: u16, y: u16) -> Result<SlotIndex, GraphError> {
        if x >= self.width || y >= self.height {
            return Err(GraphError::CoordinatesOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(SlotIndex::from_coords(x, y, self.width))
    }

    pub fn coords_of(&self, slot: SlotIndex) -> Result<(u16, u16), GraphError> {
        if slot.index() >= self.slots.len() {
            return Err(GraphError::SlotIndexOutOfRange {
                slot,
                cells: self.slots.len(),
            });
        }
        Ok((slot.0 % self.width, slot.0 / self.width))
    }

    /// Nodes in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = &SkillNode> {
        self.slots.iter().flatten()
    }

    pub fn connections(&self) -> &[SkillConnection] {
        &self.connections
    }

    /// Slots reachable from `slot` in one step, honoring connection direction.
    pub fn neighbors(&self, slot: SlotIndex) -> Result<Vec<SlotIndex>, GraphError> {
        self.node_at(slot)?;
        Ok(self
            .connections
            .iter()
            .filter_map(|connection| connection.leads_from(slot))
            .collect())
    }

    /// Sum of every node's cumulative level cost.
    pub fn points_spent(&self) -> u32 {
        self.nodes()
            .fold(0u32, |sum, node| sum.saturating_add(node.invested()))
    }

    /// Nodes that list `key` as a prerequisite.
    pub fn dependents(&self, key: &str) -> impl Iterator<Item = &SkillNode> {
        let key = key.to_string();
        self.nodes()
            .filter(move |node| node.definition().requirements.requires(&key))
    }

    /// Checks a node's requirements against the current graph and player.
    pub fn check_requirements(
        &self,
        node: &SkillNode,
        progression: &Progression,
    ) -> Result<(), UnmetRequirement> {
        let requirements = &node.definition().requirements;

        for prerequisite in &requirements.nodes {
            let obtained = self
                .node(prerequisite.as_str())
                .is_some_and(SkillNode::is_obtained);
            if !obtained {
                return Err(UnmetRequirement::Node(prerequisite.clone()));
            }
        }

        if progression.player_level < requirements.player_level {
            return Err(UnmetRequirement::PlayerLevel {
                required: requirements.player_level,
                current: progression.player_level,
            });
        }

        let spent = self.points_spent();
        if spent < requirements.points_spent {
            return Err(UnmetRequirement::PointsSpent {
                required: requirements.points_spent,
                current: spent,
            });
        }

        Ok(())
    }

    pub fn state_of(&self, key: &str, progression: &Progression) -> Option<NodeState> {
        let node = self.node(key)?;
        Some(self.state_of_node(node, progression))
    }

    /// Observable state of every node, in slot order.
    pub fn views(&self, progression: &Progression) -> Vec<NodeView> {
        self.nodes()
            .map(|node| NodeView {
                key: node.key().clone(),
                level: node.level(),
                state: self.state_of_node(node, progression),
            })
            .collect()
    }

    /// Stat bonuses granted by every obtained node.
    pub fn bonuses(&self) -> StatBonuses {
        let mut bonuses = StatBonuses::new();
        for node in self.nodes() {
            node.collect_bonuses(&mut bonuses);
        }
        bonuses
    }

    /// Spends points for the next level. Returns the new level.
    ///
    /// Requirements are checked only when acquiring level 1.
    pub fn upgrade(&mut self, key: &str, progression: &mut Progression) -> Result<u32, NodeError> {
        let node = self.lookup(key)?;
        let Some(cost) = node.next_cost() else {
            return Err(NodeError::MaxLevelReached {
                key: node.key().clone(),
                max_level: node.max_level(),
            });
        };

        if !node.is_obtained() {
            self.check_requirements(node, progression)
                .map_err(|unmet| NodeError::PrerequisiteNotMet {
                    key: node.key().clone(),
                    unmet,
                })?;
        }

        if progression.unspent_points < cost {
            return Err(NodeError::InsufficientPoints {
                key: node.key().clone(),
                required: cost,
                available: progression.unspent_points,
            });
        }

        progression.unspent_points -= cost;
        let node = self.lookup_mut(key)?;
        node.raise();

        tracing::debug!(
            "Upgraded '{}' to level {} for {} points ({} left)",
            key,
            node.level(),
            cost,
            progression.unspent_points
        );

        Ok(node.level())
    }

    /// Refunds the current level. Returns the new level.
    pub fn downgrade(
        &mut self,
        key: &str,
        progression: &mut Progression,
        config: &SkillConfig,
    ) -> Result<u32, NodeError> {
        let node = self.lookup(key)?;
        if !config.allow_downgrade {
            return Err(NodeError::NotDowngradable {
                key: node.key().clone(),
            });
        }
        if !node.is_obtained() {
            return Err(NodeError::NotObtained {
                key: node.key().clone(),
            });
        }

        if node.level() == 1 {
            self.release_dependents(key, config.downgrade_policy, progression)?;
        }

        let node = self.lookup_mut(key)?;
        let refund = node.current_cost();
        node.lower();
        progression.unspent_points = progression.unspent_points.saturating_add(refund);

        tracing::debug!(
            "Downgraded '{}' to level {}, refunded {} points",
            key,
            node.level(),
            refund
        );

        Ok(node.level())
    }

    /// Drops a node to level 0 and refunds everything invested in it.
    ///
    /// `force` bypasses the allow-downgrade setting and always cascades to
    /// dependents; otherwise the configured policy applies.
    pub fn deplete(
        &mut self,
        key: &str,
        progression: &mut Progression,
        config: &SkillConfig,
        force: bool,
    ) -> Result<(), NodeError> {
        let node = self.lookup(key)?;
        if !force && !config.allow_downgrade {
            return Err(NodeError::NotDowngradable {
                key: node.key().clone(),
            });
        }
        if !node.is_obtained() {
            return Ok(());
        }

        let policy = if force {
            DowngradePolicy::Cascade
        } else {
            config.downgrade_policy
        };
        self.release_dependents(key, policy, progression)?;
        self.zero(key, progression)
    }

    /// Depletes every node. Returns the total points refunded.
    pub fn reset(&mut self, progression: &mut Progression) -> u32 {
        let mut refunded = 0u32;
        for node in self.slots.iter_mut().flatten() {
            refunded = refunded.saturating_add(node.invested());
            node.set_level(0);
        }
        progression.unspent_points = progression.unspent_points.saturating_add(refunded);
        tracing::debug!("Reset graph '{}', refunded {} points", self.id, refunded);
        refunded
    }

    /// Levels of every node in slot order.
    pub fn levels(&self) -> Vec<u32> {
        self.nodes().map(SkillNode::level).collect()
    }

    /// Restores levels captured by [`Self::levels`]. Returns false (and
    /// changes nothing) if the length does not match this graph.
    pub fn restore_levels(&mut self, levels: &[u32]) -> bool {
        if levels.len() != self.node_count() {
            return false;
        }
        for (node, level) in self.slots.iter_mut().flatten().zip(levels) {
            node.set_level(*level);
        }
        true
    }

    pub fn level_map(&self) -> BTreeMap<NodeKey, u32> {
        self.nodes()
            .map(|node| (node.key().clone(), node.level()))
            .collect()
    }

    pub(crate) fn node_mut(&mut self, key: &str) -> Option<&mut SkillNode> {
        let slot = self.keys.get(key)?;
        self.slots.get_mut(slot.index())?.as_mut()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut SkillNode> {
        self.slots.iter_mut().flatten()
    }

    fn state_of_node(&self, node: &SkillNode, progression: &Progression) -> NodeState {
        let requirements_met =
            node.is_obtained() || self.check_requirements(node, progression).is_ok();
        node.state(requirements_met)
    }

    fn lookup(&self, key: &str) -> Result<&SkillNode, NodeError> {
        self.node(key)
            .ok_or_else(|| NodeError::UnknownNode(NodeKey::from(key)))
    }

    fn lookup_mut(&mut self, key: &str) -> Result<&mut SkillNode, NodeError> {
        self.node_mut(key)
            .ok_or_else(|| NodeError::UnknownNode(NodeKey::from(key)))
    }

    fn obtained_dependents(&self, key: &str) -> Vec<NodeKey> {
        self.dependents(key)
            .filter(|node| node.is_obtained())
            .map(|node| node.key().clone())
            .collect()
    }

    /// Applies `policy` to obtained dependents of a node about to reach level 0.
    fn release_dependents(
        &mut self,
        key: &str,
        policy: DowngradePolicy,
        progression: &mut Progression,
    ) -> Result<(), NodeError> {
        let dependents = self.obtained_dependents(key);
        if dependents.is_empty() {
            return Ok(());
        }

        match policy {
            DowngradePolicy::Block => Err(NodeError::DependentsObtained {
                key: NodeKey::from(key),
                dependents,
            }),
            DowngradePolicy::Cascade => {
                for dependent in dependents {
                    self.release_dependents(dependent.as_str(), policy, progression)?;
                    self.zero(dependent.as_str(), progression)?;
                }
                Ok(())
            }
        }
    }

    fn zero(&mut self, key: &str, progression: &mut Progression) -> Result<(), NodeError> {
        let node = self.lookup_mut(key)?;
        let refund = node.invested();
        node.set_level(0);
        progression.unspent_points = progression.unspent_points.saturating_add(refund);
        tracing::debug!("Depleted '{}', refunded {} points", key, refund);
        Ok(())
    }

    fn check_acyclic(&self) -> Result<(), GraphError> {
        let mut marks = vec![Mark::New; self.slots.len()];
        for node in self.nodes() {
            self.visit(node, &mut marks)?;
        }
        Ok(())
    }

    fn visit(&self, node: &SkillNode, marks: &mut [Mark]) -> Result<(), GraphError> {
        let index = node.slot().index();
        match marks[index] {
            Mark::Done => return Ok(()),
            Mark::Active => return Err(GraphError::CyclicPrerequisite(node.key().clone())),
            Mark::New => {}
        }

        marks[index] = Mark::Active;
        for prerequisite in &node.definition().requirements.nodes {
            if let Some(required) = self.node(prerequisite.as_str()) {
                self.visit(required, marks)?;
            }
        }
        marks[index] = Mark::Done;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{CostCurve, SkillDefinition};

    fn chain() -> SkillGraph {
        SkillGraph::from_definition(
            GraphDefinition::new("chain", 3, 2)
                .with_node(SkillDefinition::new("a", SlotIndex(0), 2))
                .with_node(SkillDefinition::new("b", SlotIndex(1), 2).requires("a"))
                .with_node(SkillDefinition::new("c", SlotIndex(2), 2).requires("b"))
                .with_connection(SkillConnection::one_way(SlotIndex(0), SlotIndex(1)))
                .with_connection(SkillConnection::two_way(SlotIndex(1), SlotIndex(2))),
        )
        .unwrap()
    }

    #[test]
    fn lookup_by_key_and_slot() {
        let graph = chain();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.cell_count(), 6);
        assert_eq!(graph.node("b").map(SkillNode::slot), Some(SlotIndex(1)));
        assert!(graph.node_at(SlotIndex(4)).unwrap().is_none());
        assert_eq!(
            graph.node_at(SlotIndex(6)).unwrap_err(),
            GraphError::SlotIndexOutOfRange {
                slot: SlotIndex(6),
                cells: 6
            }
        );
        assert_eq!(graph.slot_at(2, 1).unwrap(), SlotIndex(5));
        assert_eq!(graph.coords_of(SlotIndex(5)).unwrap(), (2, 1));
        assert_eq!(
            graph.slot_at(3, 0).unwrap_err(),
            GraphError::CoordinatesOutOfRange {
                x: 3,
                y: 0,
                width: 3,
                height: 2
            }
        );
        assert!(matches!(
            graph.slot_at(0, 2),
            Err(GraphError::CoordinatesOutOfRange { y: 2, .. })
        ));
    }

    #[test]
    fn rejects_max_level_above_limit() {
        let at_limit = GraphDefinition::new("g", 2, 1).with_node(SkillDefinition::new(
            "a",
            SlotIndex(0),
            SkillConfig::MAX_NODE_LEVEL,
        ));
        let graph = SkillGraph::from_definition(at_limit).unwrap();
        assert_eq!(
            graph.node("a").unwrap().definition().max_level,
            SkillConfig::MAX_NODE_LEVEL
        );

        let huge = GraphDefinition::new("g", 2, 1).with_node(SkillDefinition::new(
            "a",
            SlotIndex(0),
            SkillConfig::MAX_NODE_LEVEL + 1,
        ));
        assert_eq!(
            SkillGraph::from_definition(huge).unwrap_err(),
            GraphError::InvalidMaxLevel("a".into())
        );

        let unbounded = GraphDefinition::new("g", 2, 1)
            .with_node(SkillDefinition::new("a", SlotIndex(0), u32::MAX));
        assert!(matches!(
            SkillGraph::from_definition(unbounded),
            Err(GraphError::InvalidMaxLevel(_))
        ));
    }

    #[test]
    fn neighbors_respect_direction() {
        let graph = chain();
        assert_eq!(graph.neighbors(SlotIndex(0)).unwrap(), vec![SlotIndex(1)]);
        assert_eq!(graph.neighbors(SlotIndex(1)).unwrap(), vec![SlotIndex(2)]);
        assert_eq!(graph.neighbors(SlotIndex(2)).unwrap(), vec![SlotIndex(1)]);
    }

    #[test]
    fn rejects_invalid_layouts() {
        let out_of_range = GraphDefinition::new("g", 2, 1)
            .with_node(SkillDefinition::new("a", SlotIndex(2), 1));
        assert!(matches!(
            SkillGraph::from_definition(out_of_range),
            Err(GraphError::SlotIndexOutOfRange { .. })
        ));

        let occupied = GraphDefinition::new("g", 2, 1)
            .with_node(SkillDefinition::new("a", SlotIndex(0), 1))
            .with_node(SkillDefinition::new("b", SlotIndex(0), 1));
        assert!(matches!(
            SkillGraph::from_definition(occupied),
            Err(GraphError::SlotOccupied { .. })
        ));

        let unknown = GraphDefinition::new("g", 2, 1)
            .with_node(SkillDefinition::new("a", SlotIndex(0), 1).requires("ghost"));
        assert!(matches!(
            SkillGraph::from_definition(unknown),
            Err(GraphError::UnknownPrerequisite { .. })
        ));

        let cyclic = GraphDefinition::new("g", 2, 1)
            .with_node(SkillDefinition::new("a", SlotIndex(0), 1).requires("b"))
            .with_node(SkillDefinition::new("b", SlotIndex(1), 1).requires("a"));
        assert!(matches!(
            SkillGraph::from_definition(cyclic),
            Err(GraphError::CyclicPrerequisite(_))
        ));

        let free = GraphDefinition::new("g", 2, 1).with_node(
            SkillDefinition::new("a", SlotIndex(0), 2).with_cost(CostCurve::Table(vec![1, 0])),
        );
        assert_eq!(
            SkillGraph::from_definition(free).unwrap_err(),
            GraphError::ZeroCost {
                key: "a".into(),
                level: 2
            }
        );

        let unleveled = GraphDefinition::new("g", 2, 1)
            .with_node(SkillDefinition::new("a", SlotIndex(0), 0));
        assert_eq!(
            SkillGraph::from_definition(unleveled).unwrap_err(),
            GraphError::InvalidMaxLevel("a".into())
        );

        let dangling = GraphDefinition::new("g", 2, 1)
            .with_node(SkillDefinition::new("a", SlotIndex(0), 1))
            .with_connection(SkillConnection::one_way(SlotIndex(0), SlotIndex(1)));
        assert_eq!(
            SkillGraph::from_definition(dangling).unwrap_err(),
            GraphError::EmptySlot(SlotIndex(1))
        );
    }

    #[test]
    fn points_spent_sums_cumulative_costs() {
        let mut graph = chain();
        let mut progression = Progression::new(1, 10);
        graph.upgrade("a", &mut progression).unwrap();
        graph.upgrade("a", &mut progression).unwrap();
        graph.upgrade("b", &mut progression).unwrap();
        assert_eq!(graph.points_spent(), 3);
        assert_eq!(progression.unspent_points, 7);
    }

    #[test]
    fn points_spent_requirement_gates_unlock() {
        let mut graph = SkillGraph::from_definition(
            GraphDefinition::new("g", 2, 1)
                .with_node(SkillDefinition::new("a", SlotIndex(0), 3))
                .with_node(SkillDefinition::new("b", SlotIndex(1), 1).requires_points_spent(2)),
        )
        .unwrap();
        let mut progression = Progression::new(1, 5);

        assert_eq!(graph.state_of("b", &progression), Some(NodeState::Locked));
        graph.upgrade("a", &mut progression).unwrap();
        assert!(matches!(
            graph.upgrade("b", &mut progression),
            Err(NodeError::PrerequisiteNotMet {
                unmet: UnmetRequirement::PointsSpent {
                    required: 2,
                    current: 1
                },
                ..
            })
        ));
        graph.upgrade("a", &mut progression).unwrap();
        assert_eq!(graph.state_of("b", &progression), Some(NodeState::Unlocked));
    }

    #[test]
    fn player_level_requirement() {
        let mut graph = SkillGraph::from_definition(
            GraphDefinition::new("g", 1, 1)
                .with_node(SkillDefinition::new("a", SlotIndex(0), 1).requires_player_level(5)),
        )
        .unwrap();
        let mut progression = Progression::new(4, 5);
        assert!(matches!(
            graph.upgrade("a", &mut progression),
            Err(NodeError::PrerequisiteNotMet {
                unmet: UnmetRequirement::PlayerLevel { .. },
                ..
            })
        ));
        progression.player_level = 5;
        assert_eq!(graph.upgrade("a", &mut progression), Ok(1));
    }

    #[test]
    fn downgrade_blocked_by_obtained_dependents() {
        let mut graph = chain();
        let mut progression = Progression::new(1, 5);
        let config = SkillConfig::with_downgrades(DowngradePolicy::Block);
        graph.upgrade("a", &mut progression).unwrap();
        graph.upgrade("b", &mut progression).unwrap();

        let err = graph.downgrade("a", &mut progression, &config).unwrap_err();
        assert_eq!(
            err,
            NodeError::DependentsObtained {
                key: "a".into(),
                dependents: vec!["b".into()],
            }
        );
        assert_eq!(graph.node("a").map(SkillNode::level), Some(1));
        assert_eq!(progression.unspent_points, 3);
    }

    #[test]
    fn cascade_depletes_dependents_recursively() {
        let mut graph = chain();
        let mut progression = Progression::new(1, 6);
        let config = SkillConfig::with_downgrades(DowngradePolicy::Cascade);
        graph.upgrade("a", &mut progression).unwrap();
        graph.upgrade("b", &mut progression).unwrap();
        graph.upgrade("b", &mut progression).unwrap();
        graph.upgrade("c", &mut progression).unwrap();
        assert_eq!(progression.unspent_points, 2);

        assert_eq!(graph.downgrade("a", &mut progression, &config), Ok(0));

        assert_eq!(graph.levels(), vec![0, 0, 0]);
        assert_eq!(progression.unspent_points, 6);
    }

    #[test]
    fn downgrade_disabled() {
        let mut graph = chain();
        let mut progression = Progression::new(1, 1);
        graph.upgrade("a", &mut progression).unwrap();
        assert!(matches!(
            graph.downgrade("a", &mut progression, &SkillConfig::new()),
            Err(NodeError::NotDowngradable { .. })
        ));
    }

    #[test]
    fn forced_deplete_bypasses_setting_and_cascades() {
        let mut graph = chain();
        let mut progression = Progression::new(1, 3);
        graph.upgrade("a", &mut progression).unwrap();
        graph.upgrade("b", &mut progression).unwrap();

        let config = SkillConfig::new();
        assert!(graph.deplete("a", &mut progression, &config, false).is_err());
        graph.deplete("a", &mut progression, &config, true).unwrap();

        assert_eq!(graph.points_spent(), 0);
        assert_eq!(progression.unspent_points, 3);
    }

    #[test]
    fn restore_levels_rejects_wrong_length() {
        let mut graph = chain();
        assert!(!graph.restore_levels(&[1, 1]));
        assert!(graph.restore_levels(&[2, 9, 0]));
        assert_eq!(graph.levels(), vec![2, 2, 0]);
    }
}
