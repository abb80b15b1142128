//! Update operations over a project's ordered chapter list
//!
//! Every function takes the current list by reference and returns a new one;
//! the input is never modified. Out-of-range indices are reported as
//! [`QuillError::IndexOutOfRange`] and leave the caller's state as it was.

use crate::error::{QuillError, Result};
use crate::types::{Chapter, ChapterStatus};

fn check_index(chapters: &[Chapter], index: usize) -> Result<()> {
    if index < chapters.len() {
        Ok(())
    } else {
        Err(QuillError::IndexOutOfRange {
            index,
            len: chapters.len(),
        })
    }
}

/// Id for the next appended chapter
///
/// `len + 1` for any list built by [`add_chapter`]; lists with gaps or
/// larger ids (imported files) continue above their largest id. Fails when
/// no id above the largest one is left.
pub fn next_chapter_id(chapters: &[Chapter]) -> Result<u32> {
    let exhausted = || QuillError::InvalidInput("no chapter id left above the largest one".to_string());
    let len = u32::try_from(chapters.len()).map_err(|_| exhausted())?;
    let max_id = chapters.iter().map(|c| c.id).max().unwrap_or(0);
    max_id.max(len).checked_add(1).ok_or_else(exhausted)
}

/// Replace the chapter at `index` wholesale
pub fn update_chapter(chapters: &[Chapter], index: usize, chapter: Chapter) -> Result<Vec<Chapter>> {
    check_index(chapters, index)?;
    let mut next = chapters.to_vec();
    next[index] = chapter;
    Ok(next)
}

/// Append a chapter built from `template`, assigning it a fresh id
///
/// The template's `summary` and `sections` are kept as given; an empty
/// template is simply [`Chapter::seed`].
pub fn add_chapter(chapters: &[Chapter], template: Chapter) -> Result<Vec<Chapter>> {
    let id = next_chapter_id(chapters)?;
    let mut next = chapters.to_vec();
    next.push(Chapter { id, ..template });
    Ok(next)
}

/// Change only the status of the chapter at `index`
pub fn update_chapter_status(
    chapters: &[Chapter],
    index: usize,
    status: ChapterStatus,
) -> Result<Vec<Chapter>> {
    check_index(chapters, index)?;
    let mut next = chapters.to_vec();
    next[index].status = status;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_chapters() -> Vec<Chapter> {
        let mut chapters = vec![Chapter::seed(1)];
        chapters = add_chapter(&chapters, Chapter::seed(0).with_title("Zwei")).unwrap();
        add_chapter(&chapters, Chapter::seed(0).with_title("Drei")).unwrap()
    }

    #[test]
    fn test_add_chapter_assigns_sequential_ids() {
        let chapters = three_chapters();
        let ids: Vec<u32> = chapters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(chapters[2].title, "Drei");
        assert!(chapters[2].sections.is_empty());
        assert_eq!(chapters[2].summary, "");
    }

    #[test]
    fn test_add_chapter_skips_past_existing_ids() {
        let chapters = vec![Chapter::seed(1), Chapter::seed(7)];
        let next = add_chapter(&chapters, Chapter::seed(0)).unwrap();
        assert_eq!(next[2].id, 8);
    }

    #[test]
    fn test_add_chapter_after_largest_possible_id() {
        let chapters = vec![Chapter::seed(u32::MAX)];
        assert!(matches!(
            add_chapter(&chapters, Chapter::seed(0)),
            Err(QuillError::InvalidInput(_))
        ));
        assert!(next_chapter_id(&[Chapter::seed(u32::MAX - 1)]).is_ok());
    }

    #[test]
    fn test_update_chapter_replaces_wholesale() {
        let chapters = three_chapters();
        let replacement = Chapter::seed(2).with_context("Neuer Kontext");
        let next = update_chapter(&chapters, 1, replacement.clone()).unwrap();
        assert_eq!(next[1], replacement);
        assert_eq!(next[1].title, "");
        assert_eq!(next[0], chapters[0]);
        assert_eq!(next[2], chapters[2]);
        // Input untouched
        assert_eq!(chapters[1].title, "Zwei");
    }

    #[test]
    fn test_update_chapter_status_only_touches_status() {
        let chapters = three_chapters();
        let next = update_chapter_status(&chapters, 2, ChapterStatus::Done).unwrap();
        assert_eq!(next[2].status, ChapterStatus::Done);
        assert_eq!(next[2].title, "Drei");
        assert_eq!(chapters[2].status, ChapterStatus::Open);

        // Any state is reachable from any state
        let back = update_chapter_status(&next, 2, ChapterStatus::Open).unwrap();
        assert_eq!(back[2].status, ChapterStatus::Open);
    }

    #[test]
    fn test_out_of_range_index() {
        let chapters = three_chapters();
        assert!(matches!(
            update_chapter(&chapters, 3, Chapter::seed(4)),
            Err(QuillError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(update_chapter_status(&chapters, 10, ChapterStatus::Done).is_err());
    }
}
