use crate::output::{print_json, print_table};
use anyhow::Context;
use architect_core::phase;
use architect_core::store::DocumentStore;
use architect_core::types::PhaseItemStatus;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum PhaseSubcommand {
    /// Show every phase with its progress
    List,
    /// Append an item to a phase's log
    Record {
        /// Phase key, e.g. 1.2
        phase: String,
        #[arg(required = true)]
        name: Vec<String>,
        /// generated or used
        #[arg(long, default_value = "used")]
        status: PhaseItemStatus,
    },
}

pub fn run(root: &Path, subcmd: PhaseSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PhaseSubcommand::List => list(root, json),
        PhaseSubcommand::Record {
            phase,
            name,
            status,
        } => record(root, &phase, &name.join(" "), status, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let doc = super::store(root).load().context("failed to load tracking document")?;
    if json {
        return print_json(&doc.phases);
    }
    let rows = doc
        .phases
        .iter()
        .map(|(key, p)| {
            vec![
                key.clone(),
                p.name.clone(),
                p.items.len().to_string(),
                format!("{}%", p.progress()),
            ]
        })
        .collect();
    print_table(&["PHASE", "NAME", "ITEMS", "PROGRESS"], rows);
    Ok(())
}

fn record(
    root: &Path,
    key: &str,
    name: &str,
    status: PhaseItemStatus,
    json: bool,
) -> anyhow::Result<()> {
    let store = super::store(root);
    let mut doc = store.load().context("failed to load tracking document")?;
    phase::record_item(&mut doc.phases, key, name, status)?;
    store.save(&doc).context("failed to save tracking document")?;

    if json {
        print_json(&serde_json::json!({ "phase": key, "name": name, "status": status }))?;
    } else {
        println!("Recorded '{name}' in phase {key} ({status})");
    }
    Ok(())
}
