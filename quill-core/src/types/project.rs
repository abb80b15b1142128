//! The Project type - the root of the manuscript tree

use super::{BookFormat, Chapter, Genre};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A manuscript project: exclusively owns its chapters, which own their sections
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_title: String,

    pub genre: Genre,

    /// Format used for pagination estimates
    #[serde(default)]
    pub selected_format: Option<BookFormat>,

    /// Ordered chapters
    pub chapters: Vec<Chapter>,

    /// Set when the project is persisted
    #[serde(default)]
    pub last_saved: Option<DateTime<Utc>>,
}

impl Project {
    /// Create a project holding one empty seed chapter
    pub fn new(title: impl Into<String>, genre: Genre) -> Self {
        Self {
            project_title: title.into(),
            genre,
            selected_format: None,
            chapters: vec![Chapter::seed(1)],
            last_saved: None,
        }
    }

    /// Find a chapter's index by id
    pub fn chapter_index(&self, chapter_id: u32) -> Option<usize> {
        self.chapters.iter().position(|c| c.id == chapter_id)
    }

    /// Total characters across all chapters
    pub fn character_count(&self) -> usize {
        self.chapters.iter().map(Chapter::character_count).sum()
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new("Neues Projekt", Genre::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Section;

    #[test]
    fn test_project_creation() {
        let project = Project::new("Nachtfalter", Genre::Roman);
        assert_eq!(project.project_title, "Nachtfalter");
        assert_eq!(project.chapters.len(), 1);
        assert_eq!(project.chapters[0].id, 1);
        assert!(project.chapters[0].sections.is_empty());
        assert!(project.last_saved.is_none());
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Serialisierung", Genre::Lyrik);
        project.chapters[0]
            .sections
            .push(Section::new(1).with_content("Zwischen den Sekunden"));
        project.last_saved = Some(Utc::now());

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["projectTitle"], "Serialisierung");
        assert_eq!(json["genre"], "lyrik");
        assert!(json["selectedFormat"].is_null());
        assert!(json["chapters"][0]["sections"][0]["createdAt"].is_string());

        let back: Project = serde_json::from_value(json).unwrap();
        assert_eq!(back, project);
    }
}
