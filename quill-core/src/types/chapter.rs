//! Chapter type: the top-level authored unit of a project

use super::{Section, DEFAULT_DEPTH_OF_FIELD};
use crate::error::{ParseError, QuillError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Allowed target lengths for generated text, in characters
pub const DEPTH_OF_FIELD_STEPS: [u32; 5] = [3000, 3500, 4000, 4500, 5000];

/// Workflow state of a chapter
///
/// Any state may follow any other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ChapterStatus {
    #[default]
    #[serde(rename = "offen")]
    Open,

    #[serde(rename = "in-arbeit")]
    InProgress,

    #[serde(rename = "fertig")]
    Done,
}

impl ChapterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChapterStatus::Open => "offen",
            ChapterStatus::InProgress => "in-arbeit",
            ChapterStatus::Done => "fertig",
        }
    }
}

impl fmt::Display for ChapterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChapterStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "offen" => Ok(ChapterStatus::Open),
            "in-arbeit" => Ok(ChapterStatus::InProgress),
            "fertig" => Ok(ChapterStatus::Done),
            other => Err(ParseError::UnknownStatus(other.to_string())),
        }
    }
}

/// A single chapter of a manuscript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Identifier, unique within the project
    pub id: u32,

    /// Chapter title (may be empty)
    pub title: String,

    /// Authoring brief used as the prompt seed
    pub context: String,

    pub status: ChapterStatus,

    /// Target character count for generated text
    pub depth_of_field: u32,

    /// Ordered sections
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Chapter synopsis, independent of the section summaries
    #[serde(default)]
    pub summary: String,
}

impl Chapter {
    /// Create an empty chapter in the `offen` state
    pub fn seed(id: u32) -> Self {
        Self {
            id,
            title: String::new(),
            context: String::new(),
            status: ChapterStatus::Open,
            depth_of_field: DEFAULT_DEPTH_OF_FIELD,
            sections: Vec::new(),
            summary: String::new(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Set the sections
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    /// Set the depth of field, rejecting values off the 3000..=5000 ladder
    pub fn with_depth_of_field(mut self, depth: u32) -> Result<Self> {
        self.set_depth_of_field(depth)?;
        Ok(self)
    }

    /// Set the depth of field, rejecting values off the 3000..=5000 ladder
    pub fn set_depth_of_field(&mut self, depth: u32) -> Result<()> {
        if !DEPTH_OF_FIELD_STEPS.contains(&depth) {
            return Err(QuillError::InvalidInput(format!(
                "depth of field must be one of {:?}, got {}",
                DEPTH_OF_FIELD_STEPS, depth
            )));
        }
        self.depth_of_field = depth;
        Ok(())
    }

    /// Heading label: the title, or "Kapitel {position}" when untitled
    pub fn display_title(&self, position: usize) -> String {
        if self.title.is_empty() {
            format!("Kapitel {}", position)
        } else {
            self.title.clone()
        }
    }

    /// Total characters across all sections
    pub fn character_count(&self) -> usize {
        self.sections.iter().map(|s| s.content.chars().count()).sum()
    }
}

/// Human-readable description of a depth-of-field step
pub fn depth_of_field_label(depth: u32) -> Option<&'static str> {
    match depth {
        3000 => Some("Kompakt, präzise, schneller Überblick"),
        3500 => Some("Knapp strukturiert mit Kernpunkten"),
        4000 => Some("Ausgewogen mit Tiefgang"),
        4500 => Some("Detaillierte Ausarbeitung"),
        5000 => Some("Maximaler Kontext, rhetorisch ausgearbeitet"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [ChapterStatus::Open, ChapterStatus::InProgress, ChapterStatus::Done] {
            assert_eq!(status.as_str().parse::<ChapterStatus>().unwrap(), status);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
        assert!("done".parse::<ChapterStatus>().is_err());
    }

    #[test]
    fn test_depth_of_field_ladder() {
        let mut chapter = Chapter::seed(1);
        assert_eq!(chapter.depth_of_field, 4000);
        chapter.set_depth_of_field(3500).unwrap();
        assert_eq!(chapter.depth_of_field, 3500);
        assert!(chapter.set_depth_of_field(3200).is_err());
        assert!(chapter.set_depth_of_field(5500).is_err());
        assert_eq!(chapter.depth_of_field, 3500);
        assert_eq!(depth_of_field_label(4000), Some("Ausgewogen mit Tiefgang"));
    }

    #[test]
    fn test_display_title_fallback() {
        let chapter = Chapter::seed(3);
        assert_eq!(chapter.display_title(2), "Kapitel 2");
        assert_eq!(chapter.with_title("Nebel").display_title(2), "Nebel");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Chapter::seed(1)).unwrap();
        assert_eq!(json["depthOfField"], 4000);
        assert_eq!(json["status"], "offen");
    }
}
