//! The skill tree context: one graph, its player progression, the edit
//! session and the execution scheduler behind a single owner.
//!
//! All mutations go through this type so that observers see every change.
//! Graph mutations are diffed before and after (see [`GraphDelta`]) so a
//! cascade reports every node it touched.

use std::time::Duration;

use crate::config::SkillConfig;
use crate::events::{Observers, SkillEvent, SubscriptionId};
use crate::graph::{GraphDefinition, GraphDelta, GraphError, NodeView, SkillGraph};
use crate::node::{NodeError, NodeKey, NodeState};
use crate::progression::{LevelUp, Progression};
use crate::save::{LoadError, LoadReport, SaveData};
use crate::scheduler::{SkillScheduler, UseError, UseId};
use crate::session::{SessionError, SkillSession};
use crate::stats::{StatBonuses, StatRegistry};

#[derive(Debug)]
pub struct SkillTree {
    config: SkillConfig,
    graph: SkillGraph,
    progression: Progression,
    session: SkillSession,
    scheduler: SkillScheduler,
    observers: Observers<SkillEvent>,
}

impl SkillTree {
    /// Builds the graph from its definition and captures the initial baseline.
    pub fn init(
        definition: GraphDefinition,
        config: SkillConfig,
        progression: Progression,
    ) -> Result<Self, GraphError> {
        let graph = SkillGraph::from_definition(definition)?;
        let mut session = SkillSession::new();
        session.reset_baseline(&graph, &progression);

        tracing::debug!(
            "Skill tree '{}' initialised at player level {} with {} points",
            graph.id(),
            progression.player_level,
            progression.unspent_points
        );

        Ok(Self {
            config,
            graph,
            progression,
            session,
            scheduler: SkillScheduler::new(),
            observers: Observers::new(),
        })
    }

    /// Builds a tree with a fresh progression from `config.starting_points`.
    pub fn with_config(definition: GraphDefinition, config: SkillConfig) -> Result<Self, GraphError> {
        let progression = Progression::new(1, config.starting_points);
        Self::init(definition, config, progression)
    }

    /// Drops observers and in-flight uses and returns the final progress.
    pub fn teardown(mut self) -> SaveData {
        self.observers.clear();
        self.scheduler.clear();
        tracing::debug!("Skill tree '{}' torn down", self.graph.id());
        SaveData::capture(&self.graph, &self.progression)
    }

    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    pub fn graph(&self) -> &SkillGraph {
        &self.graph
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn session(&self) -> &SkillSession {
        &self.session
    }

    pub fn scheduler(&self) -> &SkillScheduler {
        &self.scheduler
    }

    pub fn unspent_points(&self) -> u32 {
        self.progression.unspent_points
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SkillEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn node_state(&self, key: &str) -> Option<NodeState> {
        self.graph.state_of(key, &self.progression)
    }

    pub fn level_of(&self, key: &str) -> Option<u32> {
        self.graph.node(key).map(|node| node.level())
    }

    // ===== progression =====

    pub fn upgrade(&mut self, key: &str) -> Result<u32, NodeError> {
        self.mutate(|graph, progression, _| graph.upgrade(key, progression))
    }

    pub fn downgrade(&mut self, key: &str) -> Result<u32, NodeError> {
        self.mutate(|graph, progression, config| graph.downgrade(key, progression, config))
    }

    /// Drops a node to level 0. `force` bypasses the downgrade setting and
    /// cascades to dependents.
    pub fn deplete(&mut self, key: &str, force: bool) -> Result<(), NodeError> {
        self.mutate(|graph, progression, config| graph.deplete(key, progression, config, force))
    }

    /// Force-depletes every node and refunds all points.
    pub fn reset(&mut self) -> u32 {
        let refunded = self.mutate(|graph, progression, _| graph.reset(progression));
        self.emit(SkillEvent::GraphReloaded {
            graph_id: self.graph.id().clone(),
        });
        refunded
    }

    /// Grants experience; level-ups award points and may unlock nodes.
    pub fn gain_experience(&mut self, amount: u64) -> LevelUp {
        let curve = self.config.level_curve.clone();
        let points_per_level = self.config.points_per_level;

        let before = self.graph.views(&self.progression);
        let points_before = self.progression.unspent_points;
        let outcome = self
            .progression
            .gain_experience(amount, &curve, points_per_level);

        if outcome.levels_gained > 0 {
            self.session.credit(outcome.points_awarded);
            tracing::debug!(
                "Player reached level {} (+{} points)",
                self.progression.player_level,
                outcome.points_awarded
            );
            self.emit(SkillEvent::LevelUp {
                previous: outcome.previous_level,
                current: self.progression.player_level,
                points_awarded: outcome.points_awarded,
            });
        }
        self.publish_delta(&before, points_before);
        outcome
    }

    // ===== session =====

    pub fn begin_session(&mut self) -> Result<(), SessionError> {
        self.session.begin(&self.graph, &self.progression)
    }

    /// Commits the session. Returns whether one was active.
    pub fn apply(&mut self) -> bool {
        self.session.apply(&self.graph, &self.progression)
    }

    /// Restores the session baseline. Returns `Ok(false)` when no session is active.
    pub fn revert(&mut self) -> Result<bool, SessionError> {
        let reverted = self.session.revert(&mut self.graph, &mut self.progression)?;
        if reverted {
            self.emit(SkillEvent::GraphReloaded {
                graph_id: self.graph.id().clone(),
            });
        }
        Ok(reverted)
    }

    // ===== execution =====

    pub fn try_use(&mut self, key: &str, stats: &mut StatRegistry) -> Result<UseId, UseError> {
        let node = self
            .graph
            .node(key)
            .ok_or_else(|| UseError::UnknownNode(NodeKey::from(key)))?;
        let result = self.scheduler.try_use(node, stats);
        self.flush_scheduler();
        result
    }

    pub fn cancel(&mut self, id: UseId, stats: &mut StatRegistry) -> Result<(), UseError> {
        let result = self.scheduler.cancel(id, stats);
        self.flush_scheduler();
        result
    }

    pub fn cooldown_remaining(&self, key: &str) -> Duration {
        self.scheduler.cooldown_remaining(key)
    }

    /// Advances in-flight uses by one fixed step.
    pub fn tick(&mut self, dt: Duration) {
        for event in self.scheduler.tick(dt) {
            self.observers.emit(&event);
        }
    }

    /// Bonuses from every obtained node, for [`StatRegistry::effective`].
    pub fn stat_bonuses(&self) -> StatBonuses {
        self.graph.bonuses()
    }

    // ===== persistence =====

    pub fn save(&self) -> SaveData {
        SaveData::capture(&self.graph, &self.progression)
    }

    /// Replaces progress with `save`, closing any session.
    pub fn load(&mut self, save: &SaveData) -> Result<LoadReport, LoadError> {
        let report = save.restore(&mut self.graph)?;
        self.progression = save.progression();
        self.session.reset_baseline(&self.graph, &self.progression);
        self.scheduler.clear();

        tracing::debug!(
            "Loaded '{}': {} levels applied, {} unknown, {} clamped",
            self.graph.id(),
            report.applied,
            report.unknown_keys.len(),
            report.clamped.len()
        );
        self.emit(SkillEvent::GraphReloaded {
            graph_id: self.graph.id().clone(),
        });
        Ok(report)
    }

    fn emit(&mut self, event: SkillEvent) {
        self.observers.emit(&event);
    }

    fn flush_scheduler(&mut self) {
        for event in self.scheduler.drain_events() {
            self.observers.emit(&event);
        }
    }

    /// Runs a graph operation and publishes whatever it changed.
    fn mutate<T>(
        &mut self,
        operation: impl FnOnce(&mut SkillGraph, &mut Progression, &SkillConfig) -> T,
    ) -> T {
        let before = self.graph.views(&self.progression);
        let points_before = self.progression.unspent_points;
        let result = operation(&mut self.graph, &mut self.progression, &self.config);
        self.publish_delta(&before, points_before);
        result
    }

    fn publish_delta(&mut self, before: &[NodeView], points_before: u32) {
        let after = self.graph.views(&self.progression);
        let delta = GraphDelta::between(
            before,
            &after,
            points_before,
            self.progression.unspent_points,
        );
        for event in delta.events() {
            self.observers.emit(&event);
        }
    }
}
