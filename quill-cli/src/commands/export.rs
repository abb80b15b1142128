//! Document export and project file exchange

use crate::config::Settings;
use crate::session::Session;
use anyhow::{Context, Result};
use quill_core::export::{document_file_name, export_document};
use quill_core::persistence::export_file_name;
use quill_core::{persistence, Action, Project};
use std::fs;
use std::path::{Path, PathBuf};

/// Write the manuscript as a Markdown document
pub fn export(settings: &Settings, output: Option<PathBuf>, include_prompts: bool) -> Result<()> {
    let session = Session::open(&settings.project_path)?;
    let project = session.project();
    let output =
        output.unwrap_or_else(|| PathBuf::from(document_file_name(&project.project_title)));

    let document = export_document(&project.chapters, &project.project_title, include_prompts);
    fs::write(&output, &document)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    tracing::info!("Exported '{}' to {:?}", project.project_title, output);
    println!("Exported to {}", output.display());
    Ok(())
}

/// Write the project as an exchangeable JSON file
pub fn export_project(settings: &Settings, output: Option<PathBuf>) -> Result<()> {
    let session = Session::open(&settings.project_path)?;
    let project = session.project();
    let output = output.unwrap_or_else(|| PathBuf::from(export_file_name(&project.project_title)));

    let json = persistence::export_project(project)?;
    fs::write(&output, json)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;
    println!("Exported project to {}", output.display());
    Ok(())
}

/// Replace the working project with an exported file
pub fn import_project(settings: &Settings, input: &Path) -> Result<()> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    let project = persistence::import_project(&json)
        .with_context(|| format!("{} is not a valid project file", input.display()))?;
    replace_project(settings, project)
}

/// Install `project` as the working project; staged text of the old one is dropped
pub(crate) fn replace_project(settings: &Settings, project: Project) -> Result<()> {
    let mut session = if settings.project_path.exists() {
        Session::open(&settings.project_path)?
    } else {
        Session::create(&settings.project_path, Project::default())
    };
    let title = project.project_title.clone();
    let chapters = project.chapters.len();
    session.bench.dispatch(Action::LoadProject(project))?;
    session.save()?;
    println!("Loaded '{}' ({} chapters)", title, chapters);
    Ok(())
}
