//! Seed the file store
//!
//! Writes a tournaments JSON file into the store, standing in for the
//! tournament creation pages, and optionally signs in a demo arbiter.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use tournament_core::{Role, Tournament, User};

use super::{open_origin, resolve_dir};

/// Token the demo sign-in flow stores.
const DEMO_TOKEN: &str = "demo-token";

/// Write tournaments from a JSON file into the store
#[derive(Parser)]
pub struct Seed {
    /// JSON file holding an array of tournaments
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Custom store directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Append to the stored tournaments instead of replacing them
    #[arg(short, long)]
    append: bool,

    /// Also sign in an arbiter with this email
    #[arg(long, value_name = "EMAIL")]
    sign_in: Option<String>,
}

impl Seed {
    pub fn execute(self) -> Result<()> {
        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let seeded: Vec<Tournament> = serde_json::from_str(&text)
            .with_context(|| format!("{} is not an array of tournaments", self.file.display()))?;

        let dir = resolve_dir(self.dir);
        let tab = open_origin(&dir)?.open_tab();
        let tournaments = tab.tournaments();

        let mut collection = if self.append {
            tournaments.list()
        } else {
            Vec::new()
        };
        let count = seeded.len();
        collection.extend(seeded);
        tournaments
            .replace_all(&collection)
            .context("Failed to store tournaments")?;

        println!(
            "{} Stored {} tournaments ({} total) in {}",
            style("✓").green(),
            count,
            collection.len(),
            dir.display()
        );

        if let Some(email) = self.sign_in {
            let profile = User {
                email: email.clone(),
                role: Role::Arbiter,
                ..User::default()
            };
            tab.session()
                .sign_in(&profile, DEMO_TOKEN)
                .context("Failed to sign in")?;
            println!("{} Signed in {} as arbiter", style("✓").green(), email);
        }

        Ok(())
    }
}
