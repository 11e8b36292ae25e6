use crate::output::{print_json, print_table};
use anyhow::Context;
use architect_core::backlog::{self, BacklogItem};
use architect_core::store::DocumentStore;
use architect_core::types::{BacklogStatus, Priority};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum BacklogSubcommand {
    /// List backlog items (open ones unless --all)
    List {
        #[arg(long)]
        all: bool,
    },
    /// Add a feature to the backlog
    Add {
        #[arg(required = true)]
        feature: Vec<String>,
        /// Phase key, e.g. 2.1
        #[arg(long)]
        phase: String,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
        #[arg(long)]
        description: Option<String>,
    },
    /// Set an item's status (pending, in_development, done, cancelled)
    Update { id: String, status: BacklogStatus },
}

pub fn run(root: &Path, subcmd: BacklogSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        BacklogSubcommand::List { all } => list(root, all, json),
        BacklogSubcommand::Add {
            feature,
            phase,
            priority,
            description,
        } => {
            let mut item = BacklogItem::new(feature.join(" "), phase);
            item.priority = priority;
            item.description = description.unwrap_or_default();
            add(root, item, json)
        }
        BacklogSubcommand::Update { id, status } => update(root, &id, status, json),
    }
}

fn list(root: &Path, all: bool, json: bool) -> anyhow::Result<()> {
    let doc = super::store(root).load().context("failed to load tracking document")?;
    let items: Vec<&BacklogItem> = if all {
        doc.backlog.iter().collect()
    } else {
        backlog::open_items(&doc.backlog).collect()
    };

    if json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("Backlog is empty.");
        return Ok(());
    }
    let rows = items
        .iter()
        .map(|i| {
            vec![
                i.id.clone(),
                i.feature.clone(),
                i.phase.clone(),
                i.priority.to_string(),
                i.status.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "FEATURE", "PHASE", "PRIORITY", "STATUS"], rows);
    Ok(())
}

fn add(root: &Path, item: BacklogItem, json: bool) -> anyhow::Result<()> {
    anyhow::ensure!(!item.feature.trim().is_empty(), "feature must not be empty");
    let store = super::store(root);
    let mut doc = store.load().context("failed to load tracking document")?;
    let feature = item.feature.clone();
    let id = backlog::add_item(&mut doc.backlog, item);
    store.save(&doc).context("failed to save tracking document")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "feature": feature }))?;
    } else {
        println!("Added [{id}]: {feature}");
    }
    Ok(())
}

fn update(root: &Path, id: &str, status: BacklogStatus, json: bool) -> anyhow::Result<()> {
    let store = super::store(root);
    let mut doc = store.load().context("failed to load tracking document")?;
    backlog::update_status(&mut doc.backlog, id, status)?;
    store.save(&doc).context("failed to save tracking document")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "status": status }))?;
    } else {
        println!("[{id}] -> {status}");
    }
    Ok(())
}
