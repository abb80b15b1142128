//! Ordered mutations over a chapter's section list
//!
//! Each operation returns a new [`Chapter`]; the chapter passed in is never
//! modified.

use crate::error::{QuillError, Result};
use crate::types::{Chapter, Section, SectionPatch};
use std::fmt;
use std::str::FromStr;

/// Question asked before a section is deleted
pub const DELETE_CONFIRMATION: &str = "Soll dieser Abschnitt wirklich gelöscht werden?";

/// Blocking yes/no prompt guarding destructive edits
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Confirms everything (batch mode, `--yes`)
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Declines everything
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&self, _message: &str) -> bool {
        false
    }
}

/// Direction for [`move_section`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

impl FromStr for Direction {
    type Err = QuillError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(QuillError::InvalidInput(format!(
                "direction must be 'up' or 'down', got '{}'",
                other
            ))),
        }
    }
}

/// Id for the next appended section: one past the largest id, or 1
pub fn next_section_id(chapter: &Chapter) -> Result<u32> {
    chapter
        .sections
        .iter()
        .map(|s| s.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| {
            QuillError::InvalidInput(format!("chapter {} has no section id left", chapter.id))
        })
}

/// Append an empty section
pub fn add_section(chapter: &Chapter) -> Result<Chapter> {
    let mut next = chapter.clone();
    next.sections.push(Section::new(next_section_id(chapter)?));
    Ok(next)
}

/// Append a section built from existing text
pub(crate) fn append_section(
    chapter: &Chapter,
    content: String,
    summary: String,
    comment: Option<String>,
) -> Result<Chapter> {
    let mut section = Section::new(next_section_id(chapter)?)
        .with_content(content)
        .with_summary(summary);
    section.comment = comment;
    let mut next = chapter.clone();
    next.sections.push(section);
    Ok(next)
}

/// Merge `patch` into the section at `index` and stamp `updated_at`
pub fn update_section(chapter: &Chapter, index: usize, patch: SectionPatch) -> Result<Chapter> {
    if index >= chapter.sections.len() {
        return Err(QuillError::IndexOutOfRange {
            index,
            len: chapter.sections.len(),
        });
    }
    let mut next = chapter.clone();
    patch.apply(&mut next.sections[index]);
    Ok(next)
}

/// Remove the section with `section_id` once `confirm` agrees
///
/// Declined prompts and unknown ids return the chapter unchanged.
pub fn delete_section(chapter: &Chapter, section_id: u32, confirm: &dyn Confirm) -> Chapter {
    if !chapter.sections.iter().any(|s| s.id == section_id) {
        return chapter.clone();
    }
    if !confirm.confirm(DELETE_CONFIRMATION) {
        tracing::debug!("Deletion of section {} declined", section_id);
        return chapter.clone();
    }
    let mut next = chapter.clone();
    next.sections.retain(|s| s.id != section_id);
    next
}

/// Swap the section at `index` with its neighbour in `direction`
///
/// Moving the first section up, the last one down, or an index past the
/// end leaves the order unchanged.
pub fn move_section(chapter: &Chapter, index: usize, direction: Direction) -> Chapter {
    let len = chapter.sections.len();
    let target = match direction {
        Direction::Up if index > 0 && index < len => index - 1,
        Direction::Down => match index.checked_add(1).filter(|t| *t < len) {
            Some(target) => target,
            None => return chapter.clone(),
        },
        _ => return chapter.clone(),
    };
    let mut next = chapter.clone();
    next.sections.swap(index, target);
    next
}
