//! Project-level commands: create, inspect, rename, genre and format

use crate::config::Settings;
use crate::session::{chapter_index, Session};
use anyhow::{bail, Context, Result};
use quill_core::formats::{find_format, formats_for, ChapterPreview};
use quill_core::{Action, Genre, Project};
use serde::Serialize;

/// Create a new project file
pub fn new_project(settings: &Settings, title: &str, genre: &str, force: bool) -> Result<()> {
    let path = &settings.project_path;
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let genre: Genre = genre.parse()?;
    let session = Session::create(path, Project::new(title, genre));
    session.save()?;
    println!("Created '{}' ({}) in {}", title, genre.label(), path.display());
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChapterInfo {
    position: usize,
    id: u32,
    title: String,
    status: String,
    depth_of_field: u32,
    sections: usize,
    characters: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectInfo {
    title: String,
    genre: String,
    format: Option<String>,
    characters: usize,
    last_saved: Option<String>,
    staged_for: Option<u32>,
    chapters: Vec<ChapterInfo>,
}

/// Display information about the project
pub fn info(settings: &Settings, json: bool) -> Result<()> {
    let session = Session::open(&settings.project_path)?;
    let project = session.project();

    let info = ProjectInfo {
        title: project.project_title.clone(),
        genre: project.genre.to_string(),
        format: project.selected_format.as_ref().map(|f| f.name.clone()),
        characters: project.character_count(),
        last_saved: project.last_saved.map(|t| t.to_rfc3339()),
        staged_for: session
            .staging()
            .chapter_id()
            .filter(|_| session.staging().is_pending()),
        chapters: project
            .chapters
            .iter()
            .enumerate()
            .map(|(i, c)| ChapterInfo {
                position: i + 1,
                id: c.id,
                title: c.display_title(i + 1),
                status: c.status.to_string(),
                depth_of_field: c.depth_of_field,
                sections: c.sections.len(),
                characters: c.character_count(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Title:       {}", info.title);
        println!("Genre:       {}", project.genre.label());
        if let Some(format) = &info.format {
            println!("Format:      {}", format);
        }
        println!("Characters:  {}", info.characters);
        if let Some(saved) = &info.last_saved {
            println!("Last saved:  {}", saved);
        }
        if let Some(id) = info.staged_for {
            println!("Staged:      text for chapter id {}", id);
        }
        println!("Chapters:    {}", info.chapters.len());
        for chapter in &info.chapters {
            println!(
                "  {:>2}. {} [{}] {} sections, {}/{} characters",
                chapter.position,
                chapter.title,
                chapter.status,
                chapter.sections,
                chapter.characters,
                chapter.depth_of_field
            );
        }
    }

    Ok(())
}

/// Rename the project
pub fn set_title(settings: &Settings, title: String) -> Result<()> {
    let mut session = Session::open(&settings.project_path)?;
    session.bench.dispatch(Action::SetTitle(title.clone()))?;
    session.save()?;
    println!("Title set to '{}'", title);
    Ok(())
}

/// Change the genre; a selected format of another genre stays selected
pub fn set_genre(settings: &Settings, genre: &str) -> Result<()> {
    let genre: Genre = genre.parse()?;
    let mut session = Session::open(&settings.project_path)?;
    session.bench.dispatch(Action::SetGenre(genre))?;
    session.save()?;
    println!("Genre set to {}", genre.label());
    Ok(())
}

/// List the formats of a genre
pub fn formats(settings: &Settings, genre: Option<&str>) -> Result<()> {
    let (genre, selected) = match genre {
        Some(g) => (g.parse::<Genre>()?, None),
        None => {
            let session = Session::open(&settings.project_path)?;
            let project = session.project();
            (
                project.genre,
                project.selected_format.as_ref().map(|f| f.name.clone()),
            )
        }
    };

    println!("Formats for {}:", genre.label());
    for format in formats_for(genre) {
        let marker = if selected.as_deref() == Some(format.name.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<16} {:>11} cm  {:>6} Zeichen/Seite  {}",
            marker,
            format.name,
            format.dimensions,
            format.characters_per_page,
            format.suitable_for.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

/// Select a format of the project's genre, or clear the selection
pub fn select_format(settings: &Settings, name: Option<&str>, clear: bool) -> Result<()> {
    let mut session = Session::open(&settings.project_path)?;
    let genre = session.project().genre;

    let format = match (name, clear) {
        (_, true) => None,
        (Some(name), false) => Some(
            find_format(genre, name)
                .cloned()
                .with_context(|| format!("No format '{}' for {}", name, genre.label()))?,
        ),
        (None, false) => bail!("Name a format or pass --clear"),
    };

    match &format {
        Some(f) => println!("Selected {} ({} cm)", f.name, f.dimensions),
        None => println!("Format cleared"),
    }
    session.bench.dispatch(Action::SelectFormat(format))?;
    session.save()
}

/// Estimate the printed pages of a chapter
pub fn preview(settings: &Settings, position: usize) -> Result<()> {
    let session = Session::open(&settings.project_path)?;
    let project = session.project();
    let index = chapter_index(project, position)?;
    let preview = ChapterPreview::new(&project.chapters[index], project.selected_format.as_ref())?;

    println!("Chapter:     {}", preview.title);
    println!(
        "Characters:  {} (target {})",
        preview.total_characters, preview.target_characters
    );
    if preview.has_content {
        println!("Pages:       {}", preview.estimated_pages);
    } else {
        println!("Pages:       0 (no text yet)");
    }
    println!("Page ratio:  {:.3}", preview.aspect_ratio);
    Ok(())
}
