//! Prompt, generation and staging commands

use crate::config::Settings;
use crate::session::{chapter_index, Session};
use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use quill_core::prompt::{build_prompt, role_name, style_options};
use quill_core::{Action, Completion, SimulatedGenerator};
use serde::Serialize;
use std::time::Duration;

fn check_style(genre: quill_core::Genre, style: &str) -> Result<()> {
    let options = style_options(genre);
    if !options.iter().any(|s| *s == style) {
        bail!(
            "Unknown style '{}' for {} (choose one of: {})",
            style,
            genre.label(),
            options.join(", ")
        );
    }
    Ok(())
}

/// List the styles of the project's genre with their roles
pub fn styles(settings: &Settings) -> Result<()> {
    let session = Session::open(&settings.project_path)?;
    let genre = session.project().genre;
    println!("Styles for {}:", genre.label());
    for style in style_options(genre) {
        println!("  {:<16} {}", style, role_name(genre, style));
    }
    Ok(())
}

/// Print the prompt that generation would send
pub fn prompt(settings: &Settings, position: usize, style: &str) -> Result<()> {
    let session = Session::open(&settings.project_path)?;
    let project = session.project();
    check_style(project.genre, style)?;
    let index = chapter_index(project, position)?;
    print!(
        "{}",
        build_prompt(&project.chapters[index], index, project.genre, style)
    );
    Ok(())
}

/// Generate text for a chapter into the staging area
pub async fn generate(settings: &Settings, position: usize, style: &str, latency_ms: u64) -> Result<()> {
    let mut session = Session::open(&settings.project_path)?;
    check_style(session.project().genre, style)?;
    let index = chapter_index(session.project(), position)?;

    let generator = SimulatedGenerator::new().with_latency(Duration::from_millis(latency_ms));
    let ticket = session.bench.begin_generation(index, style)?;
    let ticket_id = ticket.id;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Generating chapter {} as {}", position, ticket.request.role));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = match ticket.run(&generator).await {
        Ok(outcome) => outcome,
        Err(e) => {
            spinner.finish_and_clear();
            session.bench.fail_generation(ticket_id);
            return Err(e.into());
        }
    };
    spinner.finish_and_clear();

    match session.bench.complete_generation(outcome) {
        Completion::Staged { displaced } => {
            if let Some(old) = displaced {
                tracing::warn!(
                    "Discarded previously staged text for chapter id {:?}",
                    old.chapter_id()
                );
            }
            let stats = session.staging().stats();
            println!(
                "Staged {} characters in {} paragraphs for chapter {}",
                stats.characters, stats.paragraphs, position
            );
            println!("Review with `quill staged`, then `quill commit` or `quill discard`");
        }
        Completion::Stale => println!("Generation result dropped"),
    }

    session.save()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StagedView<'a> {
    chapter_id: Option<u32>,
    output: &'a str,
    summary: &'a str,
    comment: &'a str,
    prompt: Option<&'a str>,
    characters: usize,
    paragraphs: usize,
}

/// Show the staged text
pub fn staged(settings: &Settings, json: bool) -> Result<()> {
    let session = Session::open(&settings.project_path)?;
    let staging = session.staging();
    let stats = staging.stats();

    if json {
        let view = StagedView {
            chapter_id: staging.chapter_id(),
            output: &staging.output,
            summary: &staging.summary,
            comment: &staging.comment,
            prompt: staging.meta.as_ref().map(|m| m.prompt.as_str()),
            characters: stats.characters,
            paragraphs: stats.paragraphs,
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if !staging.is_pending() {
        println!("Nothing staged");
        return Ok(());
    }

    let project = session.project();
    let target = staging
        .chapter_id()
        .and_then(|id| project.chapter_index(id))
        .map(|i| project.chapters[i].display_title(i + 1))
        .unwrap_or_else(|| "(chapter removed)".to_string());
    println!("Chapter:     {}", target);
    println!("Characters:  {}", stats.characters);
    println!("Paragraphs:  {}", stats.paragraphs);
    if !staging.summary.is_empty() {
        println!("Summary:     {}", staging.summary);
    }
    if !staging.comment.is_empty() {
        println!("Comment:     {}", staging.comment);
    }
    println!();
    println!("{}", staging.output);
    Ok(())
}

/// Edit the staged fields
pub fn stage(
    settings: &Settings,
    output: Option<String>,
    summary: Option<String>,
    comment: Option<String>,
) -> Result<()> {
    let mut session = Session::open(&settings.project_path)?;
    if session.staging().meta.is_none() {
        bail!("Nothing staged (run `quill generate` first)");
    }
    if output.is_none() && summary.is_none() && comment.is_none() {
        bail!("Nothing to change (pass --output, --summary or --comment)");
    }

    if let Some(output) = output {
        session.bench.dispatch(Action::SetStagedOutput(output))?;
    }
    if let Some(summary) = summary {
        session.bench.dispatch(Action::SetStagedSummary(summary))?;
    }
    if let Some(comment) = comment {
        session.bench.dispatch(Action::SetStagedComment(comment))?;
    }
    session.save()?;
    println!("Staged text updated");
    Ok(())
}

/// Append the staged text to its chapter
pub fn commit(settings: &Settings) -> Result<()> {
    let mut session = Session::open(&settings.project_path)?;
    if !session.staging().is_pending() {
        bail!("Nothing staged to commit");
    }
    let chapter_id = session.staging().chapter_id();
    session.bench.dispatch(Action::CommitStaged)?;
    if session.staging().is_pending() {
        bail!(
            "Chapter id {:?} no longer exists; discard the staged text instead",
            chapter_id
        );
    }
    session.save()?;
    println!("Committed staged text");
    Ok(())
}

/// Throw away the staged text
pub fn discard(settings: &Settings) -> Result<()> {
    let mut session = Session::open(&settings.project_path)?;
    session.bench.dispatch(Action::DiscardStaged)?;
    session.save()?;
    println!("Staged text discarded");
    Ok(())
}
