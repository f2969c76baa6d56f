use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use runtime::{FileSaveRepository, SaveRepository};

use crate::dirs;

/// List save slots
#[derive(Parser)]
pub struct ListSaves {
    /// Custom save directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    save_dir: Option<PathBuf>,
}

impl ListSaves {
    pub fn execute(self) -> Result<()> {
        let save_dir = self.save_dir.unwrap_or_else(dirs::save_dir);

        if !save_dir.exists() {
            println!(
                "{}",
                style(format!("No saves yet ({} does not exist)", save_dir.display())).dim()
            );
            return Ok(());
        }

        let repository = FileSaveRepository::new(&save_dir)
            .with_context(|| format!("Failed to open save directory: {}", save_dir.display()))?;
        let slots = repository.list_slots()?;

        println!(
            "{} {}",
            style("Save Directory:").bold().cyan(),
            save_dir.display()
        );
        if slots.is_empty() {
            println!("{}", style("No saves found").dim());
            return Ok(());
        }

        for slot in slots {
            match repository.load(&slot) {
                Ok(Some(save)) => println!(
                    "  {} {:<16} {} (level {}, {} unspent)",
                    style("→").cyan(),
                    style(&slot).bold(),
                    save.graph_id,
                    save.player_level,
                    save.unspent_points
                ),
                Ok(None) => {}
                Err(err) => println!(
                    "  {} {:<16} {}",
                    style("✗").red().bold(),
                    style(&slot).bold(),
                    style(err).red()
                ),
            }
        }

        Ok(())
    }
}
