use anyhow::Context;
use architect_core::config::Config;
use architect_core::document::TrackingDocument;
use architect_core::store::DocumentStore;
use architect_core::{io, paths};
use std::path::Path;

use crate::output::print_json;

pub fn run(root: &Path, project: Option<&str>, json: bool) -> anyhow::Result<()> {
    let dir = paths::architect_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut config = Config::default();
    if let Some(name) = project {
        config.project.name = name.to_string();
    }
    let config_created = !paths::config_path(root).exists();
    if config_created {
        config.save(root).context("failed to write config.yaml")?;
    } else {
        config = Config::load(root).context("failed to read config.yaml")?;
    }

    let store = super::store(root);
    let tracking_created = !store.path().exists();
    if tracking_created {
        let mut doc = TrackingDocument::default();
        doc.project = config.project.name.clone();
        store.save(&doc).context("failed to write tracking.json")?;
    }

    if json {
        return print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "config_created": config_created,
            "tracking_created": tracking_created,
        }));
    }

    println!("Initializing architect in: {}", root.display());
    for (file, created) in [
        (paths::CONFIG_FILE, config_created),
        (paths::TRACKING_FILE, tracking_created),
    ] {
        let label = if created { "created:" } else { "exists: " };
        println!("  {label} {file}");
    }
    Ok(())
}
