use crate::output::{print_json, render_tree, with_fields};
use anyhow::Context;
use architect_core::tree::{self, TreeOp};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum TreeSubcommand {
    /// Print the roadmap outline
    Show {
        /// Include children of collapsed nodes
        #[arg(long)]
        all: bool,
    },
    /// Append a top-level node
    AddRoot {
        #[arg(required = true)]
        title: Vec<String>,
    },
    /// Append a child under a node
    AddChild {
        parent_id: String,
        #[arg(required = true)]
        title: Vec<String>,
    },
    /// Flip a node's done flag
    Toggle { id: String },
    /// Flip a node's expanded flag
    Expand { id: String },
    /// Change a node's title
    Rename {
        id: String,
        #[arg(required = true)]
        title: Vec<String>,
    },
    /// Delete a node and everything under it
    Remove { id: String },
    /// Replace the tree with the default roadmap
    Reset,
}

pub fn run(root: &Path, subcmd: TreeSubcommand, json: bool) -> anyhow::Result<()> {
    let op = match subcmd {
        TreeSubcommand::Show { all } => return show(root, all, json),
        TreeSubcommand::Reset => return reset(root, json),
        TreeSubcommand::AddRoot { title } => TreeOp::AddRoot {
            title: title.join(" "),
        },
        TreeSubcommand::AddChild { parent_id, title } => TreeOp::AddChild {
            parent_id,
            title: title.join(" "),
        },
        TreeSubcommand::Toggle { id } => TreeOp::ToggleDone { id },
        TreeSubcommand::Expand { id } => TreeOp::ToggleExpanded { id },
        TreeSubcommand::Rename { id, title } => TreeOp::Rename {
            id,
            title: title.join(" "),
        },
        TreeSubcommand::Remove { id } => TreeOp::Remove { id },
    };
    apply(root, &op, json)
}

fn show(root: &Path, all: bool, json: bool) -> anyhow::Result<()> {
    let forest = tree::load_forest(&super::store(root)).context("failed to load tree")?;
    if json {
        return print_json(&forest);
    }
    let (done, total) = tree::progress(&forest);
    print!("{}", render_tree(&forest, all));
    println!("\n{done}/{total} done");
    Ok(())
}

fn reset(root: &Path, json: bool) -> anyhow::Result<()> {
    let forest = tree::reset_forest(&super::store(root)).context("failed to reset tree")?;
    if json {
        return print_json(&forest);
    }
    println!("Tree reset to the default roadmap ({} sections)", forest.len());
    Ok(())
}

fn apply(root: &Path, op: &TreeOp, json: bool) -> anyhow::Result<()> {
    let (outcome, _) = tree::apply_op(&super::store(root), op).context("failed to update tree")?;
    if json {
        let op_json = serde_json::to_value(op)?;
        return print_json(&with_fields(serde_json::to_value(&outcome)?, op_json));
    }
    match (&outcome.id, outcome.applied) {
        (Some(id), _) => println!("Added [{id}]"),
        (None, true) => println!("Updated"),
        (None, false) => println!("No matching node; tree unchanged"),
    }
    Ok(())
}
