use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ARCHITECT_DIR: &str = ".architect";
pub const CONFIG_FILE: &str = ".architect/config.yaml";
pub const TRACKING_FILE: &str = ".architect/tracking.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn architect_dir(root: &Path) -> PathBuf {
    root.join(ARCHITECT_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn tracking_path(root: &Path) -> PathBuf {
    root.join(TRACKING_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_architect_dir() {
        let root = Path::new("/srv/project");
        assert!(config_path(root).starts_with(architect_dir(root)));
        assert!(tracking_path(root).starts_with(architect_dir(root)));
        assert_eq!(
            tracking_path(root),
            PathBuf::from("/srv/project/.architect/tracking.json")
        );
    }
}
