//! Chapter commands

use crate::config::Settings;
use crate::parse_position;
use crate::session::{chapter_index, Session};
use anyhow::Result;
use clap::Subcommand;
use quill_core::types::{depth_of_field_label, DEFAULT_DEPTH_OF_FIELD};
use quill_core::{Action, Chapter, ChapterStatus};

#[derive(Subcommand)]
pub enum ChapterCommand {
    /// Append a new chapter
    Add {
        /// Chapter title
        #[arg(short, long, default_value = "")]
        title: String,

        /// Authoring brief used for generation
        #[arg(short, long, default_value = "")]
        context: String,

        /// Target characters (3000, 3500, 4000, 4500 or 5000)
        #[arg(short, long, default_value_t = DEFAULT_DEPTH_OF_FIELD)]
        depth: u32,
    },

    /// Change a chapter's title, context, target length or synopsis
    Set {
        /// Chapter position (1-based)
        #[arg(value_parser = parse_position)]
        chapter: usize,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        context: Option<String>,

        /// Target characters (3000, 3500, 4000, 4500 or 5000)
        #[arg(short, long)]
        depth: Option<u32>,

        /// Chapter synopsis
        #[arg(short, long)]
        summary: Option<String>,
    },

    /// Set a chapter's status (offen, in-arbeit, fertig)
    Status {
        /// Chapter position (1-based)
        #[arg(value_parser = parse_position)]
        chapter: usize,

        status: String,
    },
}

/// Run a chapter command
pub fn chapter(settings: &Settings, command: ChapterCommand) -> Result<()> {
    let mut session = Session::open(&settings.project_path)?;

    match command {
        ChapterCommand::Add {
            title,
            context,
            depth,
        } => {
            // The id is assigned when the chapter is appended
            let template = Chapter::seed(0)
                .with_title(title)
                .with_context(context)
                .with_depth_of_field(depth)?;
            session.bench.dispatch(Action::AddChapter(template))?;
            let chapters = &session.project().chapters;
            println!(
                "Added chapter {} (id {})",
                chapters.len(),
                chapters[chapters.len() - 1].id
            );
        }

        ChapterCommand::Set {
            chapter,
            title,
            context,
            depth,
            summary,
        } => {
            let index = chapter_index(session.project(), chapter)?;
            let mut updated = session.project().chapters[index].clone();
            if let Some(title) = title {
                updated.title = title;
            }
            if let Some(context) = context {
                updated.context = context;
            }
            if let Some(depth) = depth {
                updated.set_depth_of_field(depth)?;
            }
            if let Some(summary) = summary {
                updated.summary = summary;
            }
            let label = depth_of_field_label(updated.depth_of_field).unwrap_or("");
            println!(
                "Updated chapter {}: {} ({} characters, {})",
                chapter,
                updated.display_title(chapter),
                updated.depth_of_field,
                label
            );
            session.bench.dispatch(Action::UpdateChapter {
                index,
                chapter: updated,
            })?;
        }

        ChapterCommand::Status { chapter, status } => {
            let index = chapter_index(session.project(), chapter)?;
            let status: ChapterStatus = status.parse()?;
            session
                .bench
                .dispatch(Action::SetChapterStatus { index, status })?;
            println!("Chapter {} is now {}", chapter, status);
        }
    }

    session.save()
}
