//! Read and inspect save files written by the runtime
//!
//! Deserializes `{slot}.sav` files and displays their contents. With
//! `--content`, the save is also checked against the current graph so that
//! renamed or removed nodes show up before a player loads it.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::{Path, PathBuf};

use skill_content::ContentFactory;
use skill_core::{SaveData, SkillGraph};

use crate::dirs;

/// Read and inspect save files
#[derive(Parser)]
pub struct ReadSave {
    /// Save slot name (e.g., autosave) or path to a .sav file
    #[arg(value_name = "SLOT_OR_PATH")]
    target: String,

    /// Custom save directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Content directory used to check the save against its graph
    #[arg(short, long, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (progression, node levels)
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl ReadSave {
    pub fn execute(self) -> Result<()> {
        let save_file = self.resolve_path();

        if !save_file.exists() {
            anyhow::bail!(
                "Save file not found: {}\n\nHint: run `cargo xtask list-saves` to see available slots",
                save_file.display()
            );
        }

        let bytes = std::fs::read(&save_file)
            .with_context(|| format!("Failed to read save file: {}", save_file.display()))?;

        let save: SaveData = bincode::deserialize(&bytes).with_context(|| {
            format!("Failed to deserialize save file: {}", save_file.display())
        })?;

        println!(
            "{} {}",
            style("Save File:").bold().cyan(),
            save_file.display()
        );
        println!(
            "{} {}",
            style("File Size:").bold().cyan(),
            format_bytes(bytes.len())
        );
        println!("{} {}", style("Graph:").bold().cyan(), save.graph_id);
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&save),
            OutputFormat::Json => print_json(&save)?,
            OutputFormat::Debug => print_debug(&save),
        }

        if let Some(content) = &self.content {
            check_against_content(&save, content)?;
        }

        Ok(())
    }

    fn resolve_path(&self) -> PathBuf {
        let as_path = PathBuf::from(&self.target);
        if as_path.extension().is_some() || as_path.components().count() > 1 {
            return as_path;
        }

        let save_dir = self.save_dir.clone().unwrap_or_else(dirs::save_dir);
        save_dir.join(format!("{}.sav", self.target))
    }
}

fn print_summary(save: &SaveData) {
    println!("{}", style("=== Save Summary ===").bold().green());
    println!();

    println!("{}", style("Progression:").bold().yellow());
    println!("  Player Level: {}", save.player_level);
    println!("  Experience: {}", save.experience);
    println!("  Unspent Points: {}", save.unspent_points);
    println!();

    let obtained: Vec<_> = save.levels.iter().filter(|(_, level)| **level > 0).collect();
    println!(
        "{} {}/{}",
        style("Obtained Nodes:").bold().yellow(),
        obtained.len(),
        save.levels.len()
    );
    for (key, level) in obtained {
        println!("  {:<20} level {}", key, level);
    }
    println!();
}

fn print_json(save: &SaveData) -> Result<()> {
    let json = serde_json::to_string_pretty(save).context("Failed to serialize save to JSON")?;
    println!("{}", json);
    Ok(())
}

fn print_debug(save: &SaveData) {
    println!("{:#?}", save);
}

fn check_against_content(save: &SaveData, content: &Path) -> Result<()> {
    let factory = ContentFactory::new(content);
    let definition = factory.load_graph(save.graph_id.as_str())?;
    let mut graph = SkillGraph::from_definition(definition)
        .with_context(|| format!("Graph '{}' is invalid", save.graph_id))?;

    let report = save
        .restore(&mut graph)
        .context("Save does not match its graph")?;

    println!("{}", style("Content Check:").bold().yellow());
    if report.is_clean() {
        println!("  {} all {} levels apply cleanly", style("✓").green(), report.applied);
        return Ok(());
    }

    for key in &report.unknown_keys {
        println!("  {} unknown node '{}'", style("!").yellow().bold(), key);
    }
    for key in &report.clamped {
        println!("  {} level of '{}' clamped", style("!").yellow().bold(), key);
    }
    Ok(())
}

fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;

    if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
