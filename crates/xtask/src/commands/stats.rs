//! Print the home page numbers computed from the file store.

use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

use runtime::HomeView;
use tournament_core::Metric;

use super::{ensure_exists, open_origin, resolve_dir};

/// Print home page counters and deltas
#[derive(Parser)]
pub struct Stats {
    /// Custom store directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Counters, deltas and featured tournaments
    Summary,
    /// Full JSON output of the home view
    Json,
}

impl Stats {
    pub fn execute(self) -> Result<()> {
        let dir = resolve_dir(self.dir);
        ensure_exists(&dir)?;
        let home = open_origin(&dir)?.open_tab().views().home();

        match self.format {
            OutputFormat::Summary => print_summary(&home),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&home)?),
        }

        Ok(())
    }
}

fn print_summary(home: &HomeView) {
    println!("{}", style("=== Tournament Stats ===").bold().green());
    println!();

    println!("{}", style("Counters:").bold().yellow());
    for metric in [
        Metric::Total,
        Metric::Active,
        Metric::Upcoming,
        Metric::Completed,
        Metric::Players,
    ] {
        let delta = home
            .deltas
            .iter()
            .find(|delta| delta.metric == metric)
            .map(|delta| format!("({})", delta))
            .unwrap_or_default();
        println!(
            "  {:<22} {:>5} {}",
            metric.to_string(),
            home.counters.get(metric),
            style(delta).dim()
        );
    }
    println!();

    println!("{}", style("Featured:").bold().yellow());
    if home.featured.is_empty() {
        println!("  {}", style("No tournaments yet").dim());
    }
    for card in &home.featured {
        let status = card
            .status
            .map(|status| status.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} {} [{}] {} players",
            style("→").cyan(),
            style(card.title.as_deref().unwrap_or("Untitled")).bold(),
            status,
            card.players
        );
        println!("    {}", style(&card.description).dim());
    }
    println!();

    let session = if home.logged_in {
        style("signed in").green()
    } else {
        style("signed out").red()
    };
    println!("{} {}", style("Session:").bold().yellow(), session);
}
