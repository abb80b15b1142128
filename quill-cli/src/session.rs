//! The project file on disk and its staged-text sidecar
//!
//! `<name>.json` holds the project; `<name>.staged.json` holds the staging
//! area between invocations and only exists while a block is staged.

use anyhow::{bail, Context, Result};
use quill_core::sections::Confirm;
use quill_core::{Project, Staging, Workbench};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// A loaded project ready for edits
pub struct Session {
    project_path: PathBuf,
    staging_path: PathBuf,
    pub bench: Workbench,
}

/// Sidecar path for a project file
pub fn staging_path(project_path: &Path) -> PathBuf {
    let stem = project_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("quill");
    project_path.with_file_name(format!("{}.staged.json", stem))
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let temp = path.with_extension("json.tmp");
    fs::write(&temp, data).with_context(|| format!("Failed to write {}", temp.display()))?;
    fs::rename(&temp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

impl Session {
    /// Start a session over a project that is not on disk yet
    pub fn create(project_path: &Path, project: Project) -> Self {
        Self {
            project_path: project_path.to_path_buf(),
            staging_path: staging_path(project_path),
            bench: Workbench::new(project),
        }
    }

    /// Load the project file and any staged text
    pub fn open(project_path: &Path) -> Result<Self> {
        if !project_path.exists() {
            bail!(
                "Project file {} not found (create one with `quill new <title>`)",
                project_path.display()
            );
        }
        let data = fs::read_to_string(project_path)
            .with_context(|| format!("Failed to read {}", project_path.display()))?;
        let project: Project = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse project file {}", project_path.display()))?;

        let staging_path = staging_path(project_path);
        let staging = if staging_path.exists() {
            let data = fs::read_to_string(&staging_path)
                .with_context(|| format!("Failed to read {}", staging_path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse staged text {}", staging_path.display()))?
        } else {
            Staging::new()
        };

        tracing::debug!(
            "Opened '{}' with {} chapters",
            project.project_title,
            project.chapters.len()
        );
        Ok(Self {
            project_path: project_path.to_path_buf(),
            staging_path,
            bench: Workbench::new(project).with_staging(staging),
        })
    }

    pub fn project(&self) -> &Project {
        self.bench.project()
    }

    pub fn staging(&self) -> &Staging {
        self.bench.staging()
    }

    /// Write the project and the staging sidecar back to disk
    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_vec_pretty(self.project())?;
        write_atomic(&self.project_path, &data)?;

        let staging = self.staging();
        if staging.meta.is_some() || !staging.output.is_empty() {
            write_atomic(&self.staging_path, &serde_json::to_vec_pretty(staging)?)?;
        } else if self.staging_path.exists() {
            fs::remove_file(&self.staging_path)
                .with_context(|| format!("Failed to remove {}", self.staging_path.display()))?;
        }
        tracing::debug!("Wrote {}", self.project_path.display());
        Ok(())
    }
}

/// Map a 1-based chapter position to an index, checking it exists
pub fn chapter_index(project: &Project, position: usize) -> Result<usize> {
    let len = project.chapters.len();
    if position == 0 || position > len {
        bail!("Chapter {} does not exist (the project has {} chapters)", position, len);
    }
    Ok(position - 1)
}

/// Asks on the terminal; anything but "j"/"y" declines
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{} [j/N] ", message);
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "j" | "ja" | "y" | "yes"),
            Err(_) => false,
        }
    }
}
