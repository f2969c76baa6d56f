//! Scripted simulation against real content
//!
//! Builds a runtime from a content directory, spends every available point
//! inside an edit session, casts a skill and ticks host frames until its
//! cooldown ends. Everything the runtime emits is logged through `tracing`;
//! set `RUST_LOG=trace` to include per-tick timer events.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::time::Duration;

use runtime::{InMemorySaveRepository, RuntimeConfig, RuntimeEvent, SkillRuntime};
use skill_content::ContentFactory;
use skill_core::{NodeKey, SkillEvent, SkillKind};

use crate::dirs;

/// Upper bound on simulated frames, in case a skill never comes off cooldown.
const MAX_FRAMES: u32 = 100_000;

/// Run a scripted upgrade-and-cast simulation
#[derive(Parser)]
pub struct Simulate {
    /// Content directory (defaults to $SKILLTREE_DATA_DIR or ./data)
    #[arg(value_name = "DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Graph to load (file stem under graphs/)
    #[arg(short, long)]
    graph: String,

    /// Skill to cast (defaults to the first obtained active skill)
    #[arg(short, long)]
    skill: Option<String>,

    /// Experience granted before spending points
    #[arg(short, long, default_value_t = 0)]
    experience: u64,

    /// Fixed simulation step in milliseconds
    #[arg(long, default_value_t = 50)]
    step_ms: u64,

    /// Host frame time in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let data_dir = self.data_dir.clone().unwrap_or_else(dirs::content_dir);
        let factory = ContentFactory::new(&data_dir);

        let config = RuntimeConfig {
            fixed_step: Duration::from_millis(self.step_ms),
            autosave_on_apply: false,
            ..RuntimeConfig::default()
        };
        let mut runtime = SkillRuntime::builder()
            .config(config)
            .repository(InMemorySaveRepository::new())
            .content(&factory, &self.graph)?
            .build()
            .with_context(|| format!("Failed to build runtime for '{}'", self.graph))?;

        println!(
            "{} {} ({} points)",
            style("Simulating:").bold().cyan(),
            self.graph,
            runtime.tree().unspent_points()
        );

        if self.experience > 0 {
            let outcome = runtime.gain_experience(self.experience);
            tracing::info!(
                "Granted {} experience: +{} levels, +{} points",
                self.experience,
                outcome.levels_gained,
                outcome.points_awarded
            );
        }

        spend_points(&mut runtime)?;
        log_events(runtime.drain_events());

        let Some(key) = self.skill.clone().or_else(|| first_active_skill(&runtime)) else {
            tracing::warn!("No obtained active skill to cast");
            return Ok(());
        };

        let use_id = runtime.use_skill(&key)?;
        tracing::info!("Cast {} as {}", key, use_id);

        let frame = Duration::from_millis(self.frame_ms.max(1));
        let mut frames = 0;
        log_events(runtime.drain_events());
        while runtime.cooldown_remaining(&key) > Duration::ZERO && frames < MAX_FRAMES {
            runtime.advance(frame);
            frames += 1;
            log_events(runtime.drain_events());
        }

        println!();
        println!(
            "{} {} frames, {} ticks, {:?} simulated",
            style("Finished:").bold().green(),
            frames,
            runtime.clock().ticks(),
            runtime.clock().elapsed()
        );

        println!("{}", style("Effective Stats:").bold().yellow());
        let names: Vec<String> = runtime
            .stats()
            .iter()
            .map(|(_, stat)| stat.name().to_string())
            .collect();
        for name in names {
            let effective = runtime.effective_stat(&name)?;
            let current = runtime
                .stats()
                .find(&name)
                .map(|stat| stat.current())
                .unwrap_or_default();
            println!("  {:<12} {:>6} (current {})", name, effective, current);
        }

        let save = runtime.shutdown();
        println!(
            "{} {} nodes obtained, {} points unspent",
            style("Final:").bold().cyan(),
            save.levels.values().filter(|level| **level > 0).count(),
            save.unspent_points
        );

        Ok(())
    }
}

/// Upgrades nodes in graph order inside one session until no upgrade succeeds.
fn spend_points(runtime: &mut SkillRuntime) -> Result<()> {
    let keys: Vec<NodeKey> = runtime
        .tree()
        .graph()
        .nodes()
        .map(|node| node.key().clone())
        .collect();

    runtime.begin_session()?;
    loop {
        let mut upgraded = false;
        for key in &keys {
            match runtime.upgrade(key.as_str()) {
                Ok(level) => {
                    tracing::info!("Upgraded {} to level {}", key, level);
                    upgraded = true;
                }
                Err(err) => tracing::debug!("Skipped {}: {}", key, err),
            }
        }
        if !upgraded {
            break;
        }
    }
    runtime.apply_session()?;
    Ok(())
}

fn first_active_skill(runtime: &SkillRuntime) -> Option<String> {
    runtime
        .tree()
        .graph()
        .nodes()
        .find(|node| node.is_obtained() && node.kind() == SkillKind::Active)
        .map(|node| node.key().to_string())
}

fn log_events(events: Vec<RuntimeEvent>) {
    for event in events {
        match &event {
            RuntimeEvent::Skill(
                SkillEvent::WindupTick { .. } | SkillEvent::SkillCooldownTick { .. },
            ) => tracing::trace!(topic = ?event.topic(), "{:?}", event),
            _ => tracing::info!(topic = ?event.topic(), "{:?}", event),
        }
    }
}
