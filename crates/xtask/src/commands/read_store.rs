//! Read and inspect the file store
//!
//! Lists stored keys with their sizes, or prints one key's value.

use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

use super::{ensure_exists, open_origin, resolve_dir};

/// List stored keys or print one value
#[derive(Parser)]
pub struct ReadStore {
    /// Key to print (e.g., tournaments, userData, registrations_7).
    /// If not provided, lists every key
    #[arg(value_name = "KEY")]
    key: Option<String>,

    /// Custom store directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Print values as stored instead of pretty-printed JSON
    #[arg(short, long)]
    raw: bool,
}

impl ReadStore {
    pub fn execute(self) -> Result<()> {
        let dir = resolve_dir(self.dir);
        ensure_exists(&dir)?;
        let tab = open_origin(&dir)?.open_tab();
        let storage = tab.storage();

        println!("{} {}", style("Store:").bold().cyan(), dir.display());
        println!();

        let Some(key) = self.key else {
            let keys = storage.keys();
            if keys.is_empty() {
                println!("{}", style("Store is empty").dim());
                return Ok(());
            }
            for key in keys {
                let size = storage.get_text(&key).map_or(0, |text| text.len());
                println!(
                    "  {} {} {}",
                    style("→").cyan(),
                    style(&key).bold(),
                    style(format_bytes(size)).dim()
                );
            }
            return Ok(());
        };

        let Some(text) = storage.get_text(&key) else {
            anyhow::bail!("Key not found: {}", key);
        };

        if self.raw {
            println!("{}", text);
            return Ok(());
        }

        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(err) => {
                println!("{}", text);
                eprintln!(
                    "{} value is not JSON ({})",
                    style("note:").yellow().bold(),
                    err
                );
            }
        }

        Ok(())
    }
}

fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    }
}
