use crate::output::{print_json, print_table};
use anyhow::Context;
use architect_core::inventory::Inventory;
use architect_core::store::DocumentStore;
use architect_server::AppState;
use clap::Subcommand;
use std::path::Path;

use super::Secrets;

#[derive(Subcommand)]
pub enum InventorySubcommand {
    /// Print the cached inventory
    Show,
    /// Rebuild the inventory from GitHub and cache it
    Refresh,
}

pub fn run(root: &Path, subcmd: InventorySubcommand, secrets: Secrets, json: bool) -> anyhow::Result<()> {
    let inventory = match subcmd {
        InventorySubcommand::Show => {
            super::store(root)
                .load()
                .context("failed to load tracking document")?
                .inventory
        }
        InventorySubcommand::Refresh => {
            let state = AppState::new(root.to_path_buf(), super::load_config(root)?, secrets.into());
            super::runtime()?
                .block_on(architect_server::routes::inventory::refresh(&state))
                .map_err(|e| e.0)
                .context("inventory refresh failed")?
        }
    };

    if json {
        return print_json(&inventory);
    }
    print_summary(&inventory);
    Ok(())
}

fn print_summary(inv: &Inventory) {
    let Some(updated) = inv.updated_at else {
        println!("No inventory yet. Run `architect inventory refresh`.");
        return;
    };
    let stale = if inv.is_stale(chrono::Utc::now()) {
        " (stale)"
    } else {
        ""
    };
    println!(
        "Branch {} updated {}{stale}",
        inv.branch.as_deref().unwrap_or("?"),
        updated.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(c) = &inv.last_commit {
        println!("Last commit {} by {}: {}", c.sha, c.author, c.message);
    }
    println!(
        "{} code files, {} pages, {} components, {} tables\n",
        inv.stats.total_code,
        inv.stats.pages,
        inv.stats.components,
        inv.tables.len()
    );
    let rows = inv
        .pages
        .iter()
        .map(|p| vec![p.name.clone(), p.kind.to_string(), p.path.clone()])
        .collect();
    print_table(&["PAGE", "KIND", "PATH"], rows);
}
