//! Quill Core Library
//!
//! This crate provides the manuscript model and the operations of the Quill
//! drafting tool: chapter and section editing, prompt construction, (simulated)
//! text generation, staging of generated text, project persistence and
//! document export. All edits are pure functions returning new values; the
//! [`Workbench`] owns the current state and applies them.

pub mod chapters;
pub mod error;
pub mod export;
pub mod formats;
pub mod generator;
pub mod persistence;
pub mod prompt;
pub mod providers;
pub mod sections;
pub mod staging;
pub mod storage;
pub mod types;
pub mod workbench;

pub use error::{ParseError, QuillError, Result, StorageError};
pub use generator::{GenerationRequest, SimulatedGenerator, TextGenerator};
pub use staging::{OutputMeta, OutputStats, Staging};
pub use types::{
    BookFormat, Chapter, ChapterStatus, Genre, Project, Section, SectionPatch,
};
pub use workbench::{Action, Completion, Workbench};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = Project::new("Test Book", Genre::Sachbuch);
        assert_eq!(project.project_title, "Test Book");
        assert_eq!(project.genre, Genre::Sachbuch);
    }
}
