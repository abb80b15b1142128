//! Flattening a manuscript into a readable Markdown-style document
//!
//! Heading levels: `#` project, `##` chapter, `###` prompt and section,
//! `####` section notes. Text is written verbatim, without escaping.

use crate::persistence::slug;
use crate::types::Chapter;
use std::fmt::Write;

/// Heading introducing a chapter's context
pub const PROMPT_HEADING: &str = "### Prompt:";

/// Render chapters as a document
///
/// With `include_prompts`, each chapter's context and each section's summary
/// and comment are written as well. Chapters without a title and without
/// sections are left out; the remaining chapters keep their list position in
/// fallback headings.
pub fn export_document(chapters: &[Chapter], project_title: &str, include_prompts: bool) -> String {
    let mut doc = String::new();
    // Writing to a String cannot fail
    let _ = write!(doc, "# {}\n\n", project_title);

    for (index, chapter) in chapters.iter().enumerate() {
        if chapter.title.is_empty() && chapter.sections.is_empty() {
            continue;
        }
        let _ = write!(doc, "## {}\n\n", chapter.display_title(index + 1));

        if include_prompts && !chapter.context.is_empty() {
            let _ = write!(doc, "{}\n{}\n\n", PROMPT_HEADING, chapter.context);
        }

        for (position, section) in chapter.sections.iter().enumerate() {
            let _ = write!(doc, "### Abschnitt {}\n\n{}\n\n", position + 1, section.content);

            if include_prompts {
                if !section.summary.is_empty() {
                    let _ = write!(doc, "#### Zusammenfassung:\n{}\n\n", section.summary);
                }
                if let Some(comment) = section.comment_text() {
                    let _ = write!(doc, "#### Kommentar:\n{}\n\n", comment);
                }
            }
        }
    }

    doc
}

/// File name for an exported document
pub fn document_file_name(title: &str) -> String {
    format!("{}.md", slug(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Section;

    fn chapters() -> Vec<Chapter> {
        vec![
            Chapter::seed(1)
                .with_title("Der Anruf")
                .with_context("Ein Detektiv ermittelt")
                .with_sections(vec![Section::new(1)
                    .with_content("Es klingelte.")
                    .with_summary("Anruf")
                    .with_comment("bereitet Kapitel 2 vor")]),
            Chapter::seed(2).with_context("Nur ein Entwurf"),
            Chapter::seed(3).with_sections(vec![Section::new(1).with_content("Ohne Titel.")]),
        ]
    }

    #[test]
    fn test_without_prompts() {
        let doc = export_document(&chapters(), "Nachtfalter", false);
        assert!(doc.starts_with("# Nachtfalter\n\n## Der Anruf\n\n"));
        assert!(doc.contains("### Abschnitt 1\n\nEs klingelte.\n\n"));
        assert!(!doc.contains(PROMPT_HEADING));
        assert!(!doc.contains("Zusammenfassung"));
        assert!(!doc.contains("Kommentar"));
    }

    #[test]
    fn test_with_prompts() {
        let doc = export_document(&chapters(), "Nachtfalter", true);
        assert!(doc.contains("### Prompt:\nEin Detektiv ermittelt\n\n"));
        assert!(doc.contains("#### Zusammenfassung:\nAnruf\n\n"));
        assert!(doc.contains("#### Kommentar:\nbereitet Kapitel 2 vor\n\n"));
    }

    #[test]
    fn test_untitled_empty_chapter_skipped() {
        let doc = export_document(&chapters(), "Nachtfalter", true);
        assert!(!doc.contains("Nur ein Entwurf"));
        assert!(!doc.contains("## Kapitel 2"));
        assert!(doc.contains("## Kapitel 3\n\n"));
    }

    #[test]
    fn test_document_file_name() {
        assert_eq!(document_file_name("Mein Buch"), "mein-buch.md");
    }
}
