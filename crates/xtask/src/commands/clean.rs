//! Clean the file store
//!
//! Safety: Always prompts for confirmation before deletion.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;

use super::resolve_dir;

/// Delete the file store
#[derive(Parser, Debug)]
pub struct Clean {
    /// Custom store directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Skip confirmation prompt (dangerous!)
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Clean {
    pub fn execute(self) -> Result<()> {
        let dir = resolve_dir(self.dir.clone());

        if !dir.exists() {
            println!(
                "{}",
                style("Nothing to clean - store directory doesn't exist yet").dim()
            );
            return Ok(());
        }

        println!("{}", style("Clean tournament store").yellow().bold());
        println!();
        println!("The following will be deleted:");
        println!("  {} {}", style("→").cyan(), style(dir.display()).bold());
        println!();

        if !self.yes && !self.confirm()? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        print!("Deleting store... ");
        io::stdout().flush()?;

        std::fs::remove_dir_all(&dir)
            .with_context(|| format!("Failed to delete: {}", dir.display()))?;

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
