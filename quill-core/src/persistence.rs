//! Saving, loading, exporting and importing whole projects
//!
//! Saved projects live as one JSON array under a single storage key, keyed by
//! project title: saving a title that already exists replaces that entry.

use crate::error::{ParseError, QuillError, Result, StorageError};
use crate::storage::StorageProvider;
use crate::types::{BookFormat, Chapter, Genre, Project};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Storage key holding the list of saved projects
pub const SAVED_PROJECTS_KEY: &str = "lmm-saved-projects";

/// Suffix for exported project files
pub const PROJECT_FILE_SUFFIX: &str = ".lmm.json";

/// A project as persisted: always carries the time it was saved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub project_title: String,
    pub genre: Genre,
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub selected_format: Option<BookFormat>,
    pub last_saved: DateTime<Utc>,
}

impl ProjectRecord {
    /// Snapshot a project, stamping the save time
    pub fn stamp(project: &Project) -> Self {
        Self {
            project_title: project.project_title.clone(),
            genre: project.genre,
            chapters: project.chapters.clone(),
            selected_format: project.selected_format.clone(),
            last_saved: Utc::now(),
        }
    }
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        Project {
            project_title: record.project_title,
            genre: record.genre,
            selected_format: record.selected_format,
            chapters: record.chapters,
            last_saved: Some(record.last_saved),
        }
    }
}

/// Title, save time and size of a saved project, for listings
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectSummary {
    pub title: String,
    pub last_saved: DateTime<Utc>,
    pub chapters: usize,
}

/// Saved-project collection on top of a [`StorageProvider`]
pub struct ProjectStore<S: StorageProvider> {
    storage: S,
}

impl<S: StorageProvider> ProjectStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    async fn records(&self) -> Result<Vec<ProjectRecord>> {
        match self.storage.read_optional(SAVED_PROJECTS_KEY).await? {
            Some(data) => serde_json::from_slice(&data).map_err(|e| {
                ParseError::MalformedContent(format!("saved project list: {}", e)).into()
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn write_records(&self, records: &[ProjectRecord]) -> Result<()> {
        let data = serde_json::to_vec(records)?;
        self.storage.write(SAVED_PROJECTS_KEY, data).await?;
        Ok(())
    }

    /// Save a project under its title, replacing an entry with the same title
    pub async fn save(&self, project: &Project) -> Result<ProjectRecord> {
        let mut records = self.records().await?;
        let record = ProjectRecord::stamp(project);

        match records
            .iter_mut()
            .find(|r| r.project_title == record.project_title)
        {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }

        self.write_records(&records).await?;
        tracing::info!(
            "Saved project '{}' ({} chapters)",
            record.project_title,
            record.chapters.len()
        );
        Ok(record)
    }

    /// Saved projects in save order
    pub async fn list(&self) -> Result<Vec<ProjectSummary>> {
        Ok(self
            .records()
            .await?
            .into_iter()
            .map(|r| ProjectSummary {
                title: r.project_title,
                last_saved: r.last_saved,
                chapters: r.chapters.len(),
            })
            .collect())
    }

    /// Load the project saved under `title`
    pub async fn load(&self, title: &str) -> Result<Project> {
        let record = self
            .records()
            .await?
            .into_iter()
            .find(|r| r.project_title == title)
            .ok_or_else(|| StorageError::NotFound(format!("saved project '{}'", title)))?;
        tracing::info!("Loaded saved project '{}'", title);
        Ok(record.into())
    }

    /// Remove the project saved under `title`
    pub async fn delete(&self, title: &str) -> Result<()> {
        let mut records = self.records().await?;
        let before = records.len();
        records.retain(|r| r.project_title != title);
        if records.len() == before {
            return Err(StorageError::NotFound(format!("saved project '{}'", title)).into());
        }
        self.write_records(&records).await
    }
}

/// Serialize a project for download
///
/// The project is written as it is; a project that was never saved carries
/// `"lastSaved": null`, so importing the file yields an equal project.
pub fn export_project(project: &Project) -> Result<String> {
    Ok(serde_json::to_string_pretty(project)?)
}

/// Read a project from an exported file
///
/// Only the JSON structure is checked; malformed input is an error and
/// nothing is returned.
pub fn import_project(json: &str) -> Result<Project> {
    serde_json::from_str(json).map_err(QuillError::Json)
}

fn whitespace() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Lowercase title with whitespace runs replaced by `-`
pub fn slug(title: &str) -> String {
    whitespace().replace_all(title, "-").to_lowercase()
}

/// File name for an exported project
pub fn export_file_name(title: &str) -> String {
    format!("{}{}", slug(title), PROJECT_FILE_SUFFIX)
}
