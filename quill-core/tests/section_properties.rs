//! Property tests for the section list operations and project round-trips

use chrono::Utc;
use proptest::prelude::*;
use quill_core::persistence::{export_project, import_project};
use quill_core::sections::{add_section, move_section, update_section, Direction};
use quill_core::types::{Chapter, Genre, Project, Section, SectionPatch};

/// A chapter whose sections carry the given ids and contents
fn chapter_from(entries: Vec<(u32, String)>) -> Chapter {
    let sections = entries
        .into_iter()
        .map(|(id, content)| Section::new(id).with_content(content))
        .collect();
    Chapter::seed(1).with_sections(sections)
}

fn sections_strategy() -> impl Strategy<Value = Vec<(u32, String)>> {
    prop::collection::vec((1u32..1000, "[a-zäöü ]{0,20}"), 0..8)
}

proptest! {
    #[test]
    fn add_section_appends_next_id(entries in sections_strategy()) {
        let chapter = chapter_from(entries);
        let next = add_section(&chapter).unwrap();

        let expected_id = chapter.sections.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        prop_assert_eq!(next.sections.len(), chapter.sections.len() + 1);
        prop_assert_eq!(next.sections.last().unwrap().id, expected_id);
        prop_assert_eq!(&next.sections[..chapter.sections.len()], &chapter.sections[..]);
    }

    #[test]
    fn move_section_swaps_only_neighbours(entries in sections_strategy(), index in 0usize..10, up in any::<bool>()) {
        let chapter = chapter_from(entries);
        let direction = if up { Direction::Up } else { Direction::Down };
        let moved = move_section(&chapter, index, direction);
        let len = chapter.sections.len();

        let boundary = index >= len
            || (direction == Direction::Up && index == 0)
            || (direction == Direction::Down && index + 1 == len);
        if boundary {
            prop_assert_eq!(&moved, &chapter);
        } else {
            let other = if up { index - 1 } else { index + 1 };
            prop_assert_eq!(&moved.sections[index], &chapter.sections[other]);
            prop_assert_eq!(&moved.sections[other], &chapter.sections[index]);
            for i in (0..len).filter(|i| *i != index && *i != other) {
                prop_assert_eq!(&moved.sections[i], &chapter.sections[i]);
            }
        }
    }

    #[test]
    fn update_section_keeps_identity(entries in sections_strategy(), pick in any::<prop::sample::Index>(), text in "[a-z]{0,12}") {
        let chapter = chapter_from(entries);
        prop_assume!(!chapter.sections.is_empty());
        let index = pick.index(chapter.sections.len());

        let updated = update_section(&chapter, index, SectionPatch::content(text.clone())).unwrap();
        let before = &chapter.sections[index];
        let after = &updated.sections[index];
        prop_assert_eq!(after.id, before.id);
        prop_assert_eq!(after.created_at, before.created_at);
        prop_assert!(after.updated_at > before.updated_at);
        prop_assert_eq!(&after.content, &text);
        for i in (0..chapter.sections.len()).filter(|i| *i != index) {
            prop_assert_eq!(&updated.sections[i], &chapter.sections[i]);
        }
    }

    #[test]
    fn export_import_round_trip(
        entries in sections_strategy(),
        title in "[A-Za-z ]{1,20}",
        summary in "[a-z]{0,10}",
        saved in any::<bool>(),
    ) {
        let mut project = Project::new(title, Genre::Drehbuch);
        let mut chapter = chapter_from(entries);
        chapter.summary = summary;
        project.chapters.push(Chapter { id: 2, ..chapter });
        project.last_saved = saved.then(Utc::now);

        let json = export_project(&project).unwrap();
        prop_assert_eq!(import_project(&json).unwrap(), project);
    }
}
