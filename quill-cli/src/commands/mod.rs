//! CLI command implementations

mod chapter;
mod export;
mod generate;
mod library;
mod project;
mod provider;
mod section;

pub use chapter::{chapter, ChapterCommand};
pub use export::{export, export_project, import_project};
pub use generate::{commit, discard, generate, prompt, stage, staged, styles};
pub use library::{delete, list, load, save};
pub use project::{formats, info, new_project, preview, select_format, set_genre, set_title};
pub use provider::{provider, ProviderCommand};
pub use section::{section, SectionCommand};
