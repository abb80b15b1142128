//! Resolved command-line settings

use quill_core::storage::LocalStorage;
use std::path::PathBuf;

/// Project file used when `--project` is not given
pub const DEFAULT_PROJECT_FILE: &str = "quill.json";

/// Environment variable naming the data directory
pub const DATA_DIR_ENV: &str = "QUILL_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "./quill_data";

/// Where the CLI reads and writes
#[derive(Debug, Clone)]
pub struct Settings {
    /// The project file being edited
    pub project_path: PathBuf,

    /// Root of the key-value store for saved projects and provider settings
    pub data_dir: PathBuf,
}

impl Settings {
    /// Combine flags with the environment; flags win
    pub fn resolve(project_path: PathBuf, data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| {
            std::env::var(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR))
        });
        tracing::debug!(
            "Project file {:?}, data directory {:?}",
            project_path,
            data_dir
        );
        Self {
            project_path,
            data_dir,
        }
    }

    /// Storage rooted at the data directory
    pub fn storage(&self) -> LocalStorage {
        LocalStorage::new(&self.data_dir)
    }
}
