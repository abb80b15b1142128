//! Section type: one block of authored prose inside a chapter

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A sub-unit of a chapter holding one block of text plus the notes that carry
/// context forward to the next section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Identifier, unique within the owning chapter
    pub id: u32,

    /// The authored prose
    pub content: String,

    /// Short summary handed on as context for the next section
    pub summary: String,

    /// Cross-reference annotation ("bereitet Kapitel 3 vor")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Section {
    /// Create an empty section stamped with the current time
    pub fn new(id: u32) -> Self {
        let now = Utc::now();
        Self {
            id,
            content: String::new(),
            summary: String::new(),
            comment: Some(String::new()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// The comment, treating an empty string like a missing one
    pub fn comment_text(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }

    /// Stamp `updated_at` so that it is strictly later than before
    pub(crate) fn touch(&mut self) {
        let floor = self.updated_at + Duration::milliseconds(1);
        self.updated_at = Utc::now().max(floor);
    }
}

/// Field changes for [`crate::sections::update_section`]
///
/// Only the editable fields are representable; `id` and `created_at` stay fixed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionPatch {
    pub content: Option<String>,
    pub summary: Option<String>,
    pub comment: Option<String>,
}

impl SectionPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn summary(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::default()
        }
    }

    pub fn comment(comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.summary.is_none() && self.comment.is_none()
    }

    pub(crate) fn apply(self, section: &mut Section) {
        if let Some(content) = self.content {
            section.content = content;
        }
        if let Some(summary) = self.summary {
            section.summary = summary;
        }
        if let Some(comment) = self.comment {
            section.comment = Some(comment);
        }
        section.touch();
    }
}
