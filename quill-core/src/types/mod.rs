//! Core types for the manuscript tree

mod chapter;
mod format;
mod genre;
mod project;
mod section;

pub use chapter::{depth_of_field_label, Chapter, ChapterStatus, DEPTH_OF_FIELD_STEPS};
pub use format::BookFormat;
pub use genre::Genre;
pub use project::Project;
pub use section::{Section, SectionPatch};

/// Depth of field given to newly created chapters
pub const DEFAULT_DEPTH_OF_FIELD: u32 = 4000;
