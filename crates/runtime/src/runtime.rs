//! Skill runtime orchestrator.
//!
//! [`SkillRuntime`] owns the skill tree, the user's stats, the fixed-step
//! clock and a save repository. Hosts call [`SkillRuntime::advance`] once per
//! frame and drain queued events afterwards; every other method is a thin,
//! synchronous wrapper over the tree that maps errors into [`RuntimeError`].

use std::time::Duration;

use skill_content::ContentFactory;
use skill_core::{
    GraphDefinition, LevelUp, LoadReport, Progression, SaveData, SkillTree, StatRegistry, UseId,
};

use crate::clock::FixedStepClock;
use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{EventQueue, RuntimeEvent, Topic};
use crate::repository::{FileSaveRepository, SaveRepository};

/// Builder for [`SkillRuntime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    definition: Option<GraphDefinition>,
    progression: Option<Progression>,
    stats: StatRegistry,
    repository: Option<Box<dyn SaveRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            definition: None,
            progression: None,
            stats: StatRegistry::new(),
            repository: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn graph(mut self, definition: GraphDefinition) -> Self {
        self.definition = Some(definition);
        self
    }

    /// Starting progression. Defaults to level 1 with the configured starting points.
    pub fn progression(mut self, progression: Progression) -> Self {
        self.progression = Some(progression);
        self
    }

    pub fn stats(mut self, stats: StatRegistry) -> Self {
        self.stats = stats;
        self
    }

    /// Save storage. Defaults to a file repository under `config.save_dir`.
    pub fn repository(mut self, repository: impl SaveRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// Loads skill config, stat catalog and the graph `graph_id` from a content directory.
    pub fn content(mut self, factory: &ContentFactory, graph_id: &str) -> Result<Self> {
        self.config.skill = factory
            .load_config()
            .map_err(|e| RuntimeError::Content(format!("{:#}", e)))?;
        self.stats = factory
            .load_stats()
            .map_err(|e| RuntimeError::Content(format!("{:#}", e)))?;
        self.definition = Some(
            factory
                .load_graph(graph_id)
                .map_err(|e| RuntimeError::Content(format!("{:#}", e)))?,
        );
        Ok(self)
    }

    pub fn build(self) -> Result<SkillRuntime> {
        let RuntimeBuilder {
            config,
            definition,
            progression,
            mut stats,
            repository,
        } = self;

        let definition = definition.ok_or(RuntimeError::MissingGraph)?;
        let progression =
            progression.unwrap_or_else(|| Progression::new(1, config.skill.starting_points));
        let player_level = progression.player_level;

        let mut tree = SkillTree::init(definition, config.skill.clone(), progression)?;
        stats.apply_level(player_level);

        let repository = match repository {
            Some(repository) => repository,
            None => Box::new(FileSaveRepository::new(&config.save_dir)?),
        };

        let events = EventQueue::default();
        let skill_queue = events.clone();
        tree.subscribe(move |event| skill_queue.push(RuntimeEvent::Skill(event.clone())));
        let stat_queue = events.clone();
        stats.subscribe(move |event| stat_queue.push(RuntimeEvent::Stat(event.clone())));

        let clock = FixedStepClock::new(config.fixed_step, config.max_steps_per_frame);

        tracing::debug!(
            "Runtime ready for '{}' ({:?} step, {} stats)",
            tree.graph().id(),
            clock.step(),
            stats.len()
        );

        Ok(SkillRuntime {
            config,
            tree,
            stats,
            clock,
            repository,
            events,
        })
    }
}

/// Host-facing owner of one skill tree and its user.
pub struct SkillRuntime {
    config: RuntimeConfig,
    tree: SkillTree,
    stats: StatRegistry,
    clock: FixedStepClock,
    repository: Box<dyn SaveRepository>,
    events: EventQueue,
}

impl SkillRuntime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn tree(&self) -> &SkillTree {
        &self.tree
    }

    pub fn stats(&self) -> &StatRegistry {
        &self.stats
    }

    /// Direct stat access for gameplay (damage, regeneration). Bound events are queued.
    pub fn stats_mut(&mut self) -> &mut StatRegistry {
        &mut self.stats
    }

    pub fn clock(&self) -> &FixedStepClock {
        &self.clock
    }

    /// Feeds one host frame into the clock and runs the resulting fixed ticks.
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        let steps = self.clock.advance(frame);
        let step = self.clock.step();
        for _ in 0..steps {
            self.tree.tick(step);
        }
        steps
    }

    // ===== progression =====

    pub fn upgrade(&mut self, key: &str) -> Result<u32> {
        Ok(self.tree.upgrade(key)?)
    }

    pub fn downgrade(&mut self, key: &str) -> Result<u32> {
        Ok(self.tree.downgrade(key)?)
    }

    pub fn deplete(&mut self, key: &str, force: bool) -> Result<()> {
        Ok(self.tree.deplete(key, force)?)
    }

    pub fn reset(&mut self) -> u32 {
        self.tree.reset()
    }

    /// Grants experience and re-applies stat growth when the player levels up.
    pub fn gain_experience(&mut self, amount: u64) -> LevelUp {
        let outcome = self.tree.gain_experience(amount);
        if outcome.levels_gained > 0 {
            self.stats.apply_level(self.tree.progression().player_level);
        }
        outcome
    }

    // ===== session =====

    pub fn begin_session(&mut self) -> Result<()> {
        Ok(self.tree.begin_session()?)
    }

    /// Commits the active session, autosaving if configured.
    ///
    /// The commit stands even when the autosave fails; the failure is logged
    /// and the host can retry with [`Self::save`].
    pub fn apply_session(&mut self) -> Result<bool> {
        let applied = self.tree.apply();
        if applied && self.config.autosave_on_apply {
            let slot = &self.config.autosave_slot;
            if let Err(err) = self.repository.save(slot, &self.tree.save()) {
                tracing::warn!("Autosave to '{}' failed after apply: {}", slot, err);
            }
        }
        Ok(applied)
    }

    pub fn revert_session(&mut self) -> Result<bool> {
        Ok(self.tree.revert()?)
    }

    // ===== execution =====

    pub fn use_skill(&mut self, key: &str) -> Result<UseId> {
        Ok(self.tree.try_use(key, &mut self.stats)?)
    }

    pub fn cancel(&mut self, id: UseId) -> Result<()> {
        Ok(self.tree.cancel(id, &mut self.stats)?)
    }

    pub fn cooldown_remaining(&self, key: &str) -> Duration {
        self.tree.cooldown_remaining(key)
    }

    /// Current value of `stat` with bonuses from obtained nodes applied.
    pub fn effective_stat(&self, stat: &str) -> Result<i32> {
        let id = self.stats.resolve(stat)?;
        Ok(self.stats.effective(id, &self.tree.stat_bonuses())?)
    }

    // ===== persistence =====

    pub fn save(&self, slot: &str) -> Result<()> {
        self.repository.save(slot, &self.tree.save())?;
        Ok(())
    }

    pub fn load(&mut self, slot: &str) -> Result<LoadReport> {
        let data = self
            .repository
            .load(slot)?
            .ok_or_else(|| RuntimeError::SaveNotFound(slot.to_string()))?;
        let report = self.tree.load(&data)?;
        self.stats.apply_level(self.tree.progression().player_level);
        Ok(report)
    }

    pub fn list_saves(&self) -> Result<Vec<String>> {
        Ok(self.repository.list_slots()?)
    }

    pub fn delete_save(&self, slot: &str) -> Result<()> {
        Ok(self.repository.delete(slot)?)
    }

    // ===== events =====

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Removes and returns every queued event in emission order.
    pub fn drain_events(&mut self) -> Vec<RuntimeEvent> {
        self.events.drain()
    }

    pub fn drain_topic(&mut self, topic: Topic) -> Vec<RuntimeEvent> {
        self.events.drain_topic(topic)
    }

    /// Tears down the tree and returns the final progress.
    pub fn shutdown(self) -> SaveData {
        tracing::debug!(
            "Runtime shutting down after {} ticks ({:?})",
            self.clock.ticks(),
            self.clock.elapsed()
        );
        self.tree.teardown()
    }
}
