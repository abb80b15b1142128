//! Saved-project commands backed by the data directory

use super::export::replace_project;
use crate::config::Settings;
use crate::session::Session;
use anyhow::{Context, Result};
use quill_core::persistence::ProjectStore;

/// Save the working project under its title
pub async fn save(settings: &Settings) -> Result<()> {
    let mut session = Session::open(&settings.project_path)?;
    let store = ProjectStore::new(settings.storage());
    let record = store
        .save(session.project())
        .await
        .context("Failed to save project")?;

    let mut project = session.project().clone();
    project.last_saved = Some(record.last_saved);
    let staging = session.staging().clone();
    session.bench = quill_core::Workbench::new(project).with_staging(staging);
    session.save()?;

    println!(
        "Saved '{}' at {}",
        record.project_title,
        record.last_saved.format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

/// Load a saved project into the project file
pub async fn load(settings: &Settings, title: &str) -> Result<()> {
    let store = ProjectStore::new(settings.storage());
    let project = store
        .load(title)
        .await
        .with_context(|| format!("Failed to load '{}'", title))?;
    replace_project(settings, project)
}

/// List saved projects
pub async fn list(settings: &Settings, json: bool) -> Result<()> {
    let store = ProjectStore::new(settings.storage());
    let projects = store.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else if projects.is_empty() {
        println!("No saved projects in {}", settings.data_dir.display());
    } else {
        for project in &projects {
            println!(
                "{:<32} {:>3} chapters  {}",
                project.title,
                project.chapters,
                project.last_saved.format("%Y-%m-%d %H:%M")
            );
        }
    }
    Ok(())
}

/// Delete a saved project
pub async fn delete(settings: &Settings, title: &str) -> Result<()> {
    let store = ProjectStore::new(settings.storage());
    store
        .delete(title)
        .await
        .with_context(|| format!("Failed to delete '{}'", title))?;
    println!("Deleted '{}'", title);
    Ok(())
}
