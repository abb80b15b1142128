//! Application controller: the single owner of project and staging state
//!
//! Every edit is an [`Action`] applied through [`Workbench::dispatch`], which
//! computes the next project value with the pure functions in
//! [`crate::chapters`] and [`crate::sections`] and swaps it in only on success.
//!
//! Generation is split into begin / run / complete so that no borrow of the
//! workbench is held while a backend is awaited. Several chapters may generate
//! at once; each chapter index has at most one generation in flight.

use crate::chapters::{add_chapter, update_chapter, update_chapter_status};
use crate::error::{QuillError, Result};
use crate::generator::{require_context, GenerationRequest, TextGenerator};
use crate::prompt::{build_prompt, role_name};
use crate::sections::{
    add_section, delete_section, move_section, Confirm, Direction, DELETE_CONFIRMATION,
};
use crate::staging::Staging;
use crate::types::{BookFormat, Chapter, ChapterStatus, Genre, Project, SectionPatch};
use std::collections::HashMap;
use uuid::Uuid;

/// One user edit
#[derive(Debug, Clone)]
pub enum Action {
    SetTitle(String),
    SetGenre(Genre),
    SelectFormat(Option<BookFormat>),
    AddChapter(Chapter),
    UpdateChapter { index: usize, chapter: Chapter },
    SetChapterStatus { index: usize, status: ChapterStatus },
    AddSection { chapter: usize },
    UpdateSection { chapter: usize, section: usize, patch: SectionPatch },
    /// `confirmed` carries the user's answer to the deletion prompt
    DeleteSection { chapter: usize, section_id: u32, confirmed: bool },
    MoveSection { chapter: usize, section: usize, direction: Direction },
    SetStagedOutput(String),
    SetStagedSummary(String),
    SetStagedComment(String),
    CommitStaged,
    DiscardStaged,
    LoadProject(Project),
}

/// A confirmation answered ahead of time
struct Answer(bool);

impl Confirm for Answer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// Proof that a generation was started for a chapter index
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub id: Uuid,
    pub chapter_index: usize,
    pub request: GenerationRequest,
}

impl GenerationTicket {
    /// Await the backend for this ticket
    pub async fn run(self, generator: &dyn TextGenerator) -> Result<GenerationOutcome> {
        tracing::debug!(
            "Generating chapter {} with {} backend",
            self.request.chapter.id,
            generator.name()
        );
        let text = generator.generate(&self.request).await?;
        Ok(GenerationOutcome { ticket: self, text })
    }
}

/// Finished generation, ready to be staged
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub ticket: GenerationTicket,
    pub text: String,
}

/// What [`Workbench::complete_generation`] did with an outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The text is now staged; holds the block it displaced, if any
    Staged { displaced: Option<Staging> },
    /// The generation was cancelled, superseded or its chapter is gone
    Stale,
}

/// Owner of the project being edited and its staging area
#[derive(Debug, Clone, Default)]
pub struct Workbench {
    project: Project,
    staging: Staging,
    in_flight: HashMap<usize, Uuid>,
}

impl Workbench {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            staging: Staging::new(),
            in_flight: HashMap::new(),
        }
    }

    /// Resume with a previously persisted staging area
    pub fn with_staging(mut self, staging: Staging) -> Self {
        self.staging = staging;
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn staging(&self) -> &Staging {
        &self.staging
    }

    pub fn into_parts(self) -> (Project, Staging) {
        (self.project, self.staging)
    }

    /// Whether a generation is running for the chapter index
    pub fn is_generating(&self, chapter_index: usize) -> bool {
        self.in_flight.contains_key(&chapter_index)
    }

    fn chapter(&self, index: usize) -> Result<&Chapter> {
        self.project
            .chapters
            .get(index)
            .ok_or(QuillError::IndexOutOfRange {
                index,
                len: self.project.chapters.len(),
            })
    }

    fn with_chapter(&self, index: usize, f: impl FnOnce(&Chapter) -> Result<Chapter>) -> Result<Vec<Chapter>> {
        let chapter = f(self.chapter(index)?)?;
        update_chapter(&self.project.chapters, index, chapter)
    }

    /// Apply one action; on error the state is left untouched
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        tracing::debug!("dispatch {:?}", action);
        match action {
            Action::SetTitle(title) => self.project.project_title = title,
            Action::SetGenre(genre) => self.project.genre = genre,
            Action::SelectFormat(format) => self.project.selected_format = format,
            Action::AddChapter(template) => {
                self.project.chapters = add_chapter(&self.project.chapters, template)?;
            }
            Action::UpdateChapter { index, chapter } => {
                self.project.chapters = update_chapter(&self.project.chapters, index, chapter)?;
            }
            Action::SetChapterStatus { index, status } => {
                self.project.chapters = update_chapter_status(&self.project.chapters, index, status)?;
            }
            Action::AddSection { chapter } => {
                self.project.chapters = self.with_chapter(chapter, add_section)?;
            }
            Action::UpdateSection {
                chapter,
                section,
                patch,
            } => {
                self.project.chapters = self.with_chapter(chapter, |c| {
                    crate::sections::update_section(c, section, patch)
                })?;
            }
            Action::DeleteSection {
                chapter,
                section_id,
                confirmed,
            } => {
                let answer = Answer(confirmed);
                self.project.chapters =
                    self.with_chapter(chapter, |c| Ok(delete_section(c, section_id, &answer)))?;
            }
            Action::MoveSection {
                chapter,
                section,
                direction,
            } => {
                self.project.chapters =
                    self.with_chapter(chapter, |c| Ok(move_section(c, section, direction)))?;
            }
            Action::SetStagedOutput(text) => self.staging.output = text,
            Action::SetStagedSummary(summary) => self.staging.summary = summary,
            Action::SetStagedComment(comment) => self.staging.comment = comment,
            Action::CommitStaged => {
                if let Some(chapters) = self.staging.commit(&self.project.chapters) {
                    self.project.chapters = chapters;
                }
            }
            Action::DiscardStaged => self.staging.discard(),
            Action::LoadProject(project) => {
                tracing::info!("Loaded project '{}'", project.project_title);
                if self.staging.is_pending() {
                    tracing::warn!(
                        "Discarding text staged for chapter {:?} of '{}'",
                        self.staging.chapter_id(),
                        self.project.project_title
                    );
                }
                self.project = project;
                self.staging.discard();
                self.in_flight.clear();
            }
        }
        Ok(())
    }

    /// Ask `confirm` and delete the section when it agrees
    ///
    /// Unknown section ids are a no-op and nobody is asked.
    pub fn delete_section(&mut self, chapter: usize, section_id: u32, confirm: &dyn Confirm) -> Result<()> {
        if !self.chapter(chapter)?.sections.iter().any(|s| s.id == section_id) {
            return Ok(());
        }
        let confirmed = confirm.confirm(DELETE_CONFIRMATION);
        self.dispatch(Action::DeleteSection {
            chapter,
            section_id,
            confirmed,
        })
    }

    /// Start generating text for the chapter at `chapter_index`
    ///
    /// Fails without changing state when the chapter has no context, a
    /// generation for the same index is running, or a block is still staged.
    pub fn begin_generation(&mut self, chapter_index: usize, style: &str) -> Result<GenerationTicket> {
        let chapter = self.chapter(chapter_index)?;
        require_context(chapter)?;
        if self.in_flight.contains_key(&chapter_index) {
            return Err(QuillError::GenerationInFlight(chapter_index));
        }
        if let Some(chapter_id) = self.staging.chapter_id().filter(|_| self.staging.is_pending()) {
            return Err(QuillError::StagingOccupied(chapter_id));
        }

        let genre = self.project.genre;
        let request = GenerationRequest {
            chapter: chapter.clone(),
            genre,
            role: role_name(genre, style).to_string(),
            prompt: build_prompt(chapter, chapter_index, genre, style),
        };
        let id = Uuid::new_v4();
        self.in_flight.insert(chapter_index, id);
        tracing::info!(
            "Started generation {} for chapter {} (index {})",
            id,
            request.chapter.id,
            chapter_index
        );
        Ok(GenerationTicket {
            id,
            chapter_index,
            request,
        })
    }

    /// Stage a finished generation if it is still wanted
    pub fn complete_generation(&mut self, outcome: GenerationOutcome) -> Completion {
        let GenerationOutcome { ticket, text } = outcome;
        if self.in_flight.get(&ticket.chapter_index) != Some(&ticket.id) {
            tracing::warn!("Dropping result of cancelled generation {}", ticket.id);
            return Completion::Stale;
        }
        self.in_flight.remove(&ticket.chapter_index);

        let chapter_id = ticket.request.chapter.id;
        if self.project.chapter_index(chapter_id).is_none() {
            tracing::warn!(
                "Dropping result of generation {}: chapter {} no longer exists",
                ticket.id,
                chapter_id
            );
            return Completion::Stale;
        }

        let displaced = self.staging.record(text, chapter_id, ticket.request.prompt);
        Completion::Staged { displaced }
    }

    /// Release the in-flight marker after a backend error
    pub fn fail_generation(&mut self, ticket_id: Uuid) {
        self.in_flight.retain(|_, id| *id != ticket_id);
    }

    /// Stop waiting for the generation of a chapter index; a later result is dropped
    pub fn cancel_generation(&mut self, chapter_index: usize) -> bool {
        self.in_flight.remove(&chapter_index).is_some()
    }

    /// Begin, run and complete a generation in one call
    pub async fn generate(
        &mut self,
        chapter_index: usize,
        style: &str,
        generator: &dyn TextGenerator,
    ) -> Result<Completion> {
        let ticket = self.begin_generation(chapter_index, style)?;
        let ticket_id = ticket.id;
        match ticket.run(generator).await {
            Ok(outcome) => Ok(self.complete_generation(outcome)),
            Err(e) => {
                tracing::error!("Generation for chapter index {} failed: {}", chapter_index, e);
                self.fail_generation(ticket_id);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SimulatedGenerator;
    use crate::sections::AlwaysConfirm;
    use std::time::Duration;

    fn instant() -> SimulatedGenerator {
        SimulatedGenerator::new().with_latency(Duration::ZERO)
    }

    fn workbench() -> Workbench {
        let mut project = Project::new("Test", Genre::Roman);
        project.chapters[0].context = "Ein Detektiv ermittelt".to_string();
        Workbench::new(project)
    }

    #[test]
    fn test_failed_action_leaves_state() {
        let mut bench = workbench();
        let before = bench.project().clone();
        assert!(bench
            .dispatch(Action::SetChapterStatus {
                index: 5,
                status: ChapterStatus::Done
            })
            .is_err());
        assert!(bench.dispatch(Action::AddSection { chapter: 1 }).is_err());
        assert_eq!(bench.project(), &before);
    }

    #[test]
    fn test_section_actions() {
        let mut bench = workbench();
        bench.dispatch(Action::AddSection { chapter: 0 }).unwrap();
        bench.dispatch(Action::AddSection { chapter: 0 }).unwrap();
        bench
            .dispatch(Action::UpdateSection {
                chapter: 0,
                section: 1,
                patch: SectionPatch::content("Zweiter"),
            })
            .unwrap();
        bench
            .dispatch(Action::MoveSection {
                chapter: 0,
                section: 1,
                direction: Direction::Up,
            })
            .unwrap();
        assert_eq!(bench.project().chapters[0].sections[0].content, "Zweiter");
        bench
            .dispatch(Action::DeleteSection {
                chapter: 0,
                section_id: 2,
                confirmed: false,
            })
            .unwrap();
        assert_eq!(bench.project().chapters[0].sections.len(), 2);
        bench.delete_section(0, 1, &AlwaysConfirm).unwrap();
        assert_eq!(bench.project().chapters[0].sections.len(), 1);
        assert_eq!(bench.project().chapters[0].sections[0].id, 2);
    }

    #[tokio::test]
    async fn test_generate_then_commit() {
        let mut bench = workbench();
        let completion = bench.generate(0, "beschreibend", &instant()).await.unwrap();
        assert_eq!(completion, Completion::Staged { displaced: None });
        assert!(bench.staging().output.chars().count() >= 3200);
        assert!(!bench.is_generating(0));

        bench.dispatch(Action::CommitStaged).unwrap();
        let chapter = &bench.project().chapters[0];
        assert_eq!(chapter.sections.len(), 1);
        assert_eq!(chapter.status, ChapterStatus::InProgress);
        assert!(!bench.staging().is_pending());
    }

    #[tokio::test]
    async fn test_generate_requires_context() {
        let mut bench = Workbench::new(Project::new("Leer", Genre::Lyrik));
        let err = bench.generate(0, "rhythmisch", &instant()).await.unwrap_err();
        assert!(matches!(err, QuillError::InvalidInput(_)));
        assert!(!bench.is_generating(0));
        assert!(!bench.staging().is_pending());
    }

    #[test]
    fn test_second_start_for_same_index_rejected() {
        let mut bench = workbench();
        bench.begin_generation(0, "bildhaft").unwrap();
        assert!(matches!(
            bench.begin_generation(0, "bildhaft"),
            Err(QuillError::GenerationInFlight(0))
        ));
    }

    #[tokio::test]
    async fn test_start_rejected_while_staged() {
        let mut bench = workbench();
        bench.generate(0, "bildhaft", &instant()).await.unwrap();
        assert!(matches!(
            bench.begin_generation(0, "bildhaft"),
            Err(QuillError::StagingOccupied(1))
        ));
        bench.dispatch(Action::DiscardStaged).unwrap();
        assert!(bench.begin_generation(0, "bildhaft").is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_generation_is_stale() {
        let mut bench = workbench();
        let ticket = bench.begin_generation(0, "emotional").unwrap();
        assert!(bench.cancel_generation(0));
        let outcome = ticket.run(&instant()).await.unwrap();
        assert_eq!(bench.complete_generation(outcome), Completion::Stale);
        assert!(!bench.staging().is_pending());
    }

    #[tokio::test]
    async fn test_concurrent_generations_for_two_chapters() {
        let mut bench = workbench();
        let mut second = Chapter::seed(0).with_context("Zweiter Fall");
        second.title = "Zwei".to_string();
        bench.dispatch(Action::AddChapter(second)).unwrap();

        let first = bench.begin_generation(0, "beschreibend").unwrap();
        let second = bench.begin_generation(1, "beschreibend").unwrap();
        let generator = instant();
        let (a, b) = tokio::join!(first.run(&generator), second.run(&generator));

        assert!(matches!(bench.complete_generation(a.unwrap()), Completion::Staged { displaced: None }));
        match bench.complete_generation(b.unwrap()) {
            Completion::Staged { displaced } => {
                assert_eq!(displaced.unwrap().chapter_id(), Some(1));
            }
            Completion::Stale => panic!("second generation should be staged"),
        }
        assert_eq!(bench.staging().chapter_id(), Some(2));
    }

    #[tokio::test]
    async fn test_loading_project_drops_staged_text() {
        let mut bench = workbench();
        bench.generate(0, "beschreibend", &instant()).await.unwrap();
        assert!(bench.staging().is_pending());

        bench
            .dispatch(Action::LoadProject(Project::new("B", Genre::Roman)))
            .unwrap();
        assert!(!bench.staging().is_pending());
        bench.dispatch(Action::CommitStaged).unwrap();
        let chapter = &bench.project().chapters[0];
        assert!(chapter.sections.is_empty());
        assert_eq!(chapter.status, ChapterStatus::Open);
    }

    #[test]
    fn test_delete_unknown_section_asks_nobody() {
        struct Panicking;
        impl Confirm for Panicking {
            fn confirm(&self, _message: &str) -> bool {
                panic!("asked about a section that does not exist")
            }
        }

        let mut bench = workbench();
        bench.dispatch(Action::AddSection { chapter: 0 }).unwrap();
        bench.delete_section(0, 42, &Panicking).unwrap();
        assert_eq!(bench.project().chapters[0].sections.len(), 1);
        assert!(bench.delete_section(3, 1, &Panicking).is_err());
    }

    #[test]
    fn test_add_chapter_with_exhausted_ids_leaves_state() {
        let mut project = Project::new("Import", Genre::Roman);
        project.chapters[0].id = u32::MAX;
        let mut bench = Workbench::new(project);
        let before = bench.project().clone();
        assert!(bench.dispatch(Action::AddChapter(Chapter::seed(0))).is_err());
        assert_eq!(bench.project(), &before);
    }

    #[tokio::test]
    async fn test_completion_for_replaced_project_is_stale() {
        let mut bench = workbench();
        let ticket = bench.begin_generation(0, "beschreibend").unwrap();
        let outcome = ticket.run(&instant()).await.unwrap();
        bench
            .dispatch(Action::LoadProject(Project::new("Anderes", Genre::Sachbuch)))
            .unwrap();
        assert_eq!(bench.complete_generation(outcome), Completion::Stale);
    }
}
