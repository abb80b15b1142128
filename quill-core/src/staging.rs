//! Holding area for one generated text block awaiting commit or discard

use crate::sections::append_section;
use crate::types::{Chapter, ChapterStatus};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Which chapter a staged block targets and the prompt that produced it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputMeta {
    pub chapter_id: u32,
    pub prompt: String,
}

/// The pending generated block plus the user's edits to it
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Staging {
    pub output: String,
    pub summary: String,
    pub comment: String,
    pub meta: Option<OutputMeta>,
}

impl Staging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a block is waiting to be committed
    pub fn is_pending(&self) -> bool {
        self.meta.is_some() && !self.output.is_empty()
    }

    /// Target chapter id of the pending block
    pub fn chapter_id(&self) -> Option<u32> {
        self.meta.as_ref().map(|m| m.chapter_id)
    }

    /// Stage a freshly generated text, replacing whatever was staged
    ///
    /// Returns the displaced block when one was pending.
    pub fn record(&mut self, text: impl Into<String>, chapter_id: u32, prompt: impl Into<String>) -> Option<Staging> {
        let previous = std::mem::take(self);
        self.output = text.into();
        self.meta = Some(OutputMeta {
            chapter_id,
            prompt: prompt.into(),
        });
        if previous.is_pending() {
            tracing::warn!(
                "Staged text for chapter {:?} replaced by a new generation for chapter {}",
                previous.chapter_id(),
                chapter_id
            );
            Some(previous)
        } else {
            None
        }
    }

    /// Append the staged block to its chapter as a new section
    ///
    /// The chapter is marked `in-arbeit` and staging is cleared. Returns `None`
    /// and keeps the staged block when nothing is staged, the target chapter
    /// is gone or it has no section id left.
    pub fn commit(&mut self, chapters: &[Chapter]) -> Option<Vec<Chapter>> {
        let chapter_id = self.chapter_id().filter(|id| *id != 0)?;
        if self.output.is_empty() {
            return None;
        }
        let index = chapters.iter().position(|c| c.id == chapter_id)?;

        let comment = Some(self.comment.clone()).filter(|c| !c.is_empty());
        let mut chapter = match append_section(
            &chapters[index],
            self.output.clone(),
            self.summary.clone(),
            comment,
        ) {
            Ok(chapter) => chapter,
            Err(e) => {
                tracing::warn!("Cannot commit staged text to chapter {}: {}", chapter_id, e);
                return None;
            }
        };
        chapter.status = ChapterStatus::InProgress;

        let mut next = chapters.to_vec();
        next[index] = chapter;
        self.discard();
        tracing::info!("Committed staged text to chapter {}", chapter_id);
        Some(next)
    }

    /// Clear every staged field
    pub fn discard(&mut self) {
        *self = Self::default();
    }

    /// Character and paragraph counts of the staged text
    pub fn stats(&self) -> OutputStats {
        OutputStats::of(&self.output)
    }
}

/// Size of a text block as shown beside the staged output
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct OutputStats {
    pub characters: usize,
    pub paragraphs: usize,
}

fn paragraph_break() -> &'static Regex {
    static PARAGRAPH_BREAK: OnceLock<Regex> = OnceLock::new();
    PARAGRAPH_BREAK.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid paragraph regex"))
}

impl OutputStats {
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            paragraphs: paragraph_break()
                .split(text)
                .filter(|p| !p.trim().is_empty())
                .count(),
        }
    }
}
