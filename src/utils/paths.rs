use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".papaya";
const JOURNALS_DIR: &str = "journals";
const STATE_FILE: &str = "state.json";
const CONFIG_FILE: &str = "config.json";

/// Returns the application-specific data directory, defaulting to `~/.papaya`.
pub fn data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("PAPAYA_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding one JSON document per journal.
pub fn journals_dir_in(base: &Path) -> PathBuf {
    base.join(JOURNALS_DIR)
}

/// Path to the shared state file (tracking the last opened journal).
pub fn state_file_in(base: &Path) -> PathBuf {
    base.join(STATE_FILE)
}

/// Path to the active configuration file.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
