//! Section commands

use crate::config::Settings;
use crate::parse_position;
use crate::session::{chapter_index, Session, TerminalConfirm};
use anyhow::{bail, Context, Result};
use clap::Subcommand;
use quill_core::sections::{AlwaysConfirm, Confirm, Direction};
use quill_core::{Action, SectionPatch};

#[derive(Subcommand)]
pub enum SectionCommand {
    /// List the sections of a chapter
    List {
        /// Chapter position (1-based)
        #[arg(value_parser = parse_position)]
        chapter: usize,
    },

    /// Append an empty section to a chapter
    Add {
        /// Chapter position (1-based)
        #[arg(value_parser = parse_position)]
        chapter: usize,
    },

    /// Edit a section's text, summary or comment
    Edit {
        /// Chapter position (1-based)
        #[arg(value_parser = parse_position)]
        chapter: usize,

        /// Section position within the chapter (1-based)
        #[arg(value_parser = parse_position)]
        section: usize,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        summary: Option<String>,

        #[arg(long)]
        comment: Option<String>,
    },

    /// Delete a section after confirmation
    Delete {
        /// Chapter position (1-based)
        #[arg(value_parser = parse_position)]
        chapter: usize,

        /// Section position within the chapter (1-based)
        #[arg(value_parser = parse_position)]
        section: usize,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Move a section up or down within its chapter
    Move {
        /// Chapter position (1-based)
        #[arg(value_parser = parse_position)]
        chapter: usize,

        /// Section position within the chapter (1-based)
        #[arg(value_parser = parse_position)]
        section: usize,

        /// up or down
        direction: Direction,
    },
}

fn preview_line(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() > 60 {
        format!("{}...", line.chars().take(60).collect::<String>())
    } else {
        line.to_string()
    }
}

/// Run a section command
pub fn section(settings: &Settings, command: SectionCommand) -> Result<()> {
    let mut session = Session::open(&settings.project_path)?;

    match command {
        SectionCommand::List { chapter } => {
            let index = chapter_index(session.project(), chapter)?;
            let chapter = &session.project().chapters[index];
            if chapter.sections.is_empty() {
                println!("No sections");
            }
            for (i, section) in chapter.sections.iter().enumerate() {
                println!(
                    "{:>2}. (id {}) {} chars  {}",
                    i + 1,
                    section.id,
                    section.content.chars().count(),
                    preview_line(&section.content)
                );
                if !section.summary.is_empty() {
                    println!("      Zusammenfassung: {}", section.summary);
                }
                if let Some(comment) = section.comment_text() {
                    println!("      Kommentar: {}", comment);
                }
            }
            return Ok(());
        }

        SectionCommand::Add { chapter } => {
            let index = chapter_index(session.project(), chapter)?;
            session.bench.dispatch(Action::AddSection { chapter: index })?;
            let count = session.project().chapters[index].sections.len();
            println!("Added section {} to chapter {}", count, chapter);
        }

        SectionCommand::Edit {
            chapter,
            section,
            content,
            summary,
            comment,
        } => {
            let index = chapter_index(session.project(), chapter)?;
            let patch = SectionPatch {
                content,
                summary,
                comment,
            };
            if patch.is_empty() {
                bail!("Nothing to change (pass --content, --summary or --comment)");
            }
            session.bench.dispatch(Action::UpdateSection {
                chapter: index,
                section: section - 1,
                patch,
            })?;
            println!("Updated section {} of chapter {}", section, chapter);
        }

        SectionCommand::Delete {
            chapter,
            section,
            yes,
        } => {
            let index = chapter_index(session.project(), chapter)?;
            let section_id = session.project().chapters[index]
                .sections
                .get(section - 1)
                .map(|s| s.id)
                .with_context(|| format!("Chapter {} has no section {}", chapter, section))?;

            let confirm: &dyn Confirm = if yes { &AlwaysConfirm } else { &TerminalConfirm };
            let before = session.project().chapters[index].sections.len();
            session.bench.delete_section(index, section_id, confirm)?;
            if session.project().chapters[index].sections.len() == before {
                println!("Kept section {}", section);
                return Ok(());
            }
            println!("Deleted section {} of chapter {}", section, chapter);
        }

        SectionCommand::Move {
            chapter,
            section,
            direction,
        } => {
            let index = chapter_index(session.project(), chapter)?;
            session.bench.dispatch(Action::MoveSection {
                chapter: index,
                section: section - 1,
                direction,
            })?;
            println!("Moved section {} {}", section, direction);
        }
    }

    session.save()
}
