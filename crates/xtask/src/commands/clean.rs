//! Clean save data command
//!
//! Removes the runtime's save directory. Always prompts for confirmation
//! before deletion unless `--yes` is given.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;

use runtime::repository::validate_slot;

use crate::dirs;

/// Clean save data
#[derive(Parser, Debug)]
pub struct Clean {
    /// Custom save directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Delete a single slot instead of the whole directory
    #[arg(long)]
    pub slot: Option<String>,

    /// Skip confirmation prompt (dangerous!)
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Clean {
    pub fn execute(self) -> Result<()> {
        let save_dir = self.save_dir.clone().unwrap_or_else(dirs::save_dir);

        let (label, target) = match &self.slot {
            Some(slot) => {
                validate_slot(slot)?;
                (
                    format!("Save slot ({})", slot),
                    save_dir.join(format!("{}.sav", slot)),
                )
            }
            None => ("All save data".to_string(), save_dir),
        };

        if !target.exists() {
            println!(
                "{}",
                style("Nothing to clean - no save data exists yet").dim()
            );
            return Ok(());
        }

        println!("{}", style("Clean Skill Tree Saves").yellow().bold());
        println!();
        println!("The following will be deleted:");
        println!("  {} {}", style("→").cyan(), style(&label).bold());
        println!("    {}", style(target.display()).dim());
        println!();

        if !self.yes && !self.confirm()? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        print!("Deleting {}... ", label);
        io::stdout().flush()?;

        if target.is_dir() {
            std::fs::remove_dir_all(&target)
        } else {
            std::fs::remove_file(&target)
        }
        .with_context(|| format!("Failed to delete: {}", target.display()))?;

        println!("{}", style("✓").green());
        println!();
        println!("{}", style("✓ Cleanup complete!").green().bold());

        Ok(())
    }

    /// Prompt user for confirmation
    fn confirm(&self) -> Result<bool> {
        print!("{} ", style("Proceed? [y/N]").yellow().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }
}
