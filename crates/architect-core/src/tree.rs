//! Hierarchical project-plan tree.
//!
//! The forest is an ordered `Vec<Node>`. Every editing operation is a plain
//! function over `&mut Vec<Node>` / `&mut [Node]` and is forgiving: an
//! unknown id or a blank title leaves the forest untouched and reports
//! `false` / `None` instead of failing. Only the persistence helpers at the
//! bottom of the module can return errors, and only for I/O.
//!
//! Ids are dot-delimited positions (`"2.3.1"`) assigned when a node is
//! created. They are not recomputed after a removal, so a later insert under
//! the same parent can reuse the id of a removed sibling.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::roadmap;
use crate::store::DocumentStore;

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(alias = "titulo")]
    pub title: String,
    #[serde(default, alias = "concluido")]
    pub done: bool,
    #[serde(default, alias = "expandido")]
    pub expanded: bool,
    #[serde(default, alias = "filhos")]
    pub children: Vec<Node>,
}

impl Node {
    /// A fresh, collapsed, not-done node without children.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            done: false,
            expanded: false,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// Depth-first pre-order iterator over a forest. A node is yielded before
/// its children, and a node's whole subtree before its next sibling.
pub struct PreOrder<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    self.stack.push(node.children.iter());
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

pub fn pre_order(forest: &[Node]) -> PreOrder<'_> {
    PreOrder {
        stack: vec![forest.iter()],
    }
}

/// Where a node lives: directly in the root list, or under a parent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRef<'a> {
    Root,
    Node(&'a Node),
}

/// First node with `id` in pre-order, or `None`.
pub fn find<'a>(forest: &'a [Node], id: &str) -> Option<&'a Node> {
    pre_order(forest).find(|n| n.id == id)
}

fn find_mut<'a>(forest: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    for node in forest.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Parent of the first node with `id` in pre-order.
pub fn find_parent<'a>(forest: &'a [Node], id: &str) -> Option<ParentRef<'a>> {
    fn parent_within<'a>(node: &'a Node, id: &str) -> Option<&'a Node> {
        for child in &node.children {
            if child.id == id {
                return Some(node);
            }
            if let Some(parent) = parent_within(child, id) {
                return Some(parent);
            }
        }
        None
    }

    for root in forest {
        if root.id == id {
            return Some(ParentRef::Root);
        }
        if let Some(parent) = parent_within(root, id) {
            return Some(ParentRef::Node(parent));
        }
    }
    None
}

/// Total and done counts over every node in the forest.
pub fn progress(forest: &[Node]) -> (usize, usize) {
    pre_order(forest).fold((0, 0), |(done, total), n| {
        (done + usize::from(n.done), total + 1)
    })
}

// ---------------------------------------------------------------------------
// Editing operations
// ---------------------------------------------------------------------------

fn clean_title(title: &str) -> Option<&str> {
    let trimmed = title.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Flip `done` on the node with `id`. Children are not touched.
pub fn toggle_done(forest: &mut [Node], id: &str) -> bool {
    match find_mut(forest, id) {
        Some(node) => {
            node.done = !node.done;
            true
        }
        None => false,
    }
}

/// Flip `expanded` on the node with `id`.
pub fn toggle_expanded(forest: &mut [Node], id: &str) -> bool {
    match find_mut(forest, id) {
        Some(node) => {
            node.expanded = !node.expanded;
            true
        }
        None => false,
    }
}

/// Set the title of `id` to the trimmed `title`. Blank titles are rejected.
pub fn rename(forest: &mut [Node], id: &str, title: &str) -> bool {
    let Some(title) = clean_title(title) else {
        return false;
    };
    match find_mut(forest, id) {
        Some(node) => {
            node.title = title.to_string();
            true
        }
        None => false,
    }
}

/// Append a child under `parent_id` and open the parent. Returns the new id.
pub fn add_child(forest: &mut [Node], parent_id: &str, title: &str) -> Option<String> {
    let title = clean_title(title)?;
    let parent = find_mut(forest, parent_id)?;
    let id = format!("{}.{}", parent.id, parent.children.len() + 1);
    parent.children.push(Node::new(id.clone(), title));
    parent.expanded = true;
    Some(id)
}

/// Append a new, expanded root. Returns the new id.
pub fn add_root(forest: &mut Vec<Node>, title: &str) -> Option<String> {
    let title = clean_title(title)?;
    let id = (forest.len() + 1).to_string();
    let mut node = Node::new(id.clone(), title);
    node.expanded = true;
    forest.push(node);
    Some(id)
}

/// Remove the node with `id` and its subtree. Each level's own list is
/// searched before descending into its nodes' children; the first match
/// wins. Surviving siblings keep their order.
pub fn remove_subtree(forest: &mut Vec<Node>, id: &str) -> Option<Node> {
    if let Some(pos) = forest.iter().position(|n| n.id == id) {
        return Some(forest.remove(pos));
    }
    forest
        .iter_mut()
        .find_map(|node| remove_subtree(&mut node.children, id))
}

// ---------------------------------------------------------------------------
// TreeOp: a single edit, as sent by the dashboard or the CLI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TreeOp {
    ToggleDone { id: String },
    ToggleExpanded { id: String },
    Rename { id: String, title: String },
    AddChild { parent_id: String, title: String },
    AddRoot { title: String },
    Remove { id: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OpOutcome {
    pub applied: bool,
    /// Id of the node created by `AddChild` / `AddRoot`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl TreeOp {
    pub fn apply(&self, forest: &mut Vec<Node>) -> OpOutcome {
        let applied = |applied: bool| OpOutcome { applied, id: None };
        let created = |id: Option<String>| OpOutcome {
            applied: id.is_some(),
            id,
        };
        match self {
            TreeOp::ToggleDone { id } => applied(toggle_done(forest, id)),
            TreeOp::ToggleExpanded { id } => applied(toggle_expanded(forest, id)),
            TreeOp::Rename { id, title } => applied(rename(forest, id, title)),
            TreeOp::AddChild { parent_id, title } => created(add_child(forest, parent_id, title)),
            TreeOp::AddRoot { title } => created(add_root(forest, title)),
            TreeOp::Remove { id } => applied(remove_subtree(forest, id).is_some()),
        }
    }
}

// ---------------------------------------------------------------------------
// Persistence (whole-forest, through the document store)
// ---------------------------------------------------------------------------

/// Current forest. The default roadmap is stored first if none exists yet.
pub fn load_forest<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<Node>> {
    let mut doc = store.load()?;
    match doc.tree {
        Some(forest) => Ok(forest),
        None => {
            let forest = roadmap::default_forest();
            doc.tree = Some(forest.clone());
            store.save(&doc)?;
            Ok(forest)
        }
    }
}

/// Replace the stored forest wholesale. No shape or id validation.
pub fn save_forest<S: DocumentStore + ?Sized>(store: &S, forest: Vec<Node>) -> Result<()> {
    let mut doc = store.load()?;
    doc.tree = Some(forest);
    store.save(&doc)
}

/// Replace the stored forest with a fresh default roadmap and return it.
pub fn reset_forest<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<Node>> {
    let forest = roadmap::default_forest();
    save_forest(store, forest.clone())?;
    Ok(forest)
}

/// Load, apply one edit, and write back when something changed.
pub fn apply_op<S: DocumentStore + ?Sized>(store: &S, op: &TreeOp) -> Result<(OpOutcome, Vec<Node>)> {
    let mut doc = store.load()?;
    let seeded = doc.tree.is_none();
    let forest = doc.tree.get_or_insert_with(roadmap::default_forest);
    let outcome = op.apply(forest);
    if !outcome.applied {
        tracing::debug!(?op, "tree edit was a no-op");
    }
    let forest = forest.clone();
    if outcome.applied || seeded {
        store.save(&doc)?;
    }
    Ok((outcome, forest))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
