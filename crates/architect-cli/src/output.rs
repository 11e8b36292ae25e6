use architect_core::tree::Node;
use serde_json::Value;

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", line(headers.iter().map(|h| h.to_string()).collect()));
    println!("{}", line(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        println!("{}", line(row));
    }
}

/// Indented outline of the forest. Collapsed children are skipped unless
/// `all` is set.
pub fn render_tree(forest: &[Node], all: bool) -> String {
    fn walk(out: &mut String, nodes: &[Node], depth: usize, all: bool) {
        for n in nodes {
            let mark = if n.done { "x" } else { " " };
            let fold = match (n.is_leaf(), n.expanded || all) {
                (true, _) => ' ',
                (false, true) => '-',
                (false, false) => '+',
            };
            out.push_str(&format!(
                "{:indent$}{fold} [{mark}] {} {}\n",
                "",
                n.id,
                n.title,
                indent = depth * 2
            ));
            if n.expanded || all {
                walk(out, &n.children, depth + 1, all);
            }
        }
    }
    let mut out = String::new();
    walk(&mut out, forest, 0, all);
    out
}

/// `{"applied": .., "id": ..}` merged with extra keys, for `--json` output.
pub fn with_fields(mut base: Value, extra: Value) -> Value {
    if let (Some(b), Value::Object(e)) = (base.as_object_mut(), extra) {
        b.extend(e);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_nodes_hide_children() {
        let mut root = Node::new("1", "Catalog");
        root.children.push(Node::new("1.1", "Search"));
        root.children[0].done = true;

        let out = render_tree(std::slice::from_ref(&root), false);
        assert_eq!(out, "+ [ ] 1 Catalog\n");

        let out = render_tree(&[root], true);
        assert_eq!(out, "- [ ] 1 Catalog\n    [x] 1.1 Search\n");
    }

    #[test]
    fn with_fields_merges_objects() {
        let v = with_fields(
            serde_json::json!({ "applied": true }),
            serde_json::json!({ "id": "2" }),
        );
        assert_eq!(v, serde_json::json!({ "applied": true, "id": "2" }));
    }
}
