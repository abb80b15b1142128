//! Prompt construction for chapter text generation
//!
//! The prompt is a fixed template filled from the chapter, its position and an
//! authorial role. The role comes from a genre x style table.

use crate::types::{Chapter, Genre};

/// Role used when a style is not listed for the genre
pub const DEFAULT_ROLE: &str = "Autor";

const ROMAN_ROLES: [(&str, &str); 5] = [
    ("beschreibend", "Erzähler mit Fokus auf Beschreibungen"),
    ("dialogreich", "Dialogorientierter Erzähler"),
    ("atmosphärisch", "Atmosphärischer Stilist"),
    ("bildhaft", "Bildhafter Erzähler"),
    ("emotional", "Emotional fokussierter Autor"),
];

const SACHBUCH_ROLES: [(&str, &str); 5] = [
    ("wissenschaftlich", "Wissenschaftlicher Autor"),
    ("analytisch", "Analytischer Experte"),
    ("sachlich", "Sachlicher Informationsvermittler"),
    ("informativ", "Didaktischer Erklärer"),
    ("präzise", "Präzisionsorientierter Fachautor"),
];

const DREHBUCH_ROLES: [(&str, &str); 5] = [
    ("szenisch", "Filmischer Szenengestalter"),
    ("dialogorientiert", "Dialogspezialist"),
    ("visuell", "Visueller Szenenentwerfer"),
    ("actionreich", "Action-Sequenz-Autor"),
    ("charakterbasiert", "Charakterentwickler"),
];

const LYRIK_ROLES: [(&str, &str); 5] = [
    ("metaphorisch", "Metaphorischer Poet"),
    ("rhythmisch", "Rhythmischer Wortkünstler"),
    ("verdichtet", "Autor verdichteter Sprache"),
    ("assoziativ", "Assoziativer Sprachspieler"),
    ("bildreich", "Bildhafter Lyriker"),
];

fn role_table(genre: Genre) -> &'static [(&'static str, &'static str); 5] {
    match genre {
        Genre::Roman => &ROMAN_ROLES,
        Genre::Sachbuch => &SACHBUCH_ROLES,
        Genre::Drehbuch => &DREHBUCH_ROLES,
        Genre::Lyrik => &LYRIK_ROLES,
    }
}

/// The five styles offered for a genre, in display order
pub fn style_options(genre: Genre) -> [&'static str; 5] {
    let table = *role_table(genre);
    table.map(|(style, _)| style)
}

/// Resolve the authorial role for a genre and style
pub fn role_name(genre: Genre, style: &str) -> &'static str {
    role_table(genre)
        .iter()
        .find(|(s, _)| *s == style)
        .map(|(_, role)| *role)
        .unwrap_or(DEFAULT_ROLE)
}

/// Build the generation prompt for the chapter at `index` (0-based)
pub fn build_prompt(chapter: &Chapter, index: usize, genre: Genre, style: &str) -> String {
    let role = role_name(genre, style);
    let position = if chapter.title.is_empty() {
        format!("Kapitel {}", index + 1)
    } else {
        format!("Kapitel {}: {}", index + 1, chapter.title)
    };

    format!(
        "
Rolle: Du bist ein {role}.
Kontext: {context}
Position im Buch: {position}
Stil und Sprache: präzise, stringent ({style})
Absatzstruktur: Klare Absätze mit 4-6 Zeilen, logisch gegliedert
Länge: Maximal {depth} Zeichen
Aufgabe: Schreibe einen Text gemäß den obigen Vorgaben.
",
        context = chapter.context,
        depth = chapter.depth_of_field,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_lookup() {
        assert_eq!(role_name(Genre::Roman, "dialogreich"), "Dialogorientierter Erzähler");
        assert_eq!(role_name(Genre::Lyrik, "bildreich"), "Bildhafter Lyriker");
        assert_eq!(role_name(Genre::Drehbuch, "actionreich"), "Action-Sequenz-Autor");
        // Style from another genre
        assert_eq!(role_name(Genre::Sachbuch, "emotional"), DEFAULT_ROLE);
        assert_eq!(role_name(Genre::Roman, ""), DEFAULT_ROLE);
    }

    #[test]
    fn test_every_style_has_a_role() {
        for genre in Genre::ALL {
            for style in style_options(genre) {
                assert_ne!(role_name(genre, style), DEFAULT_ROLE, "{} / {}", genre, style);
            }
        }
    }

    #[test]
    fn test_build_prompt_with_title() {
        let chapter = Chapter::seed(1)
            .with_title("Der Anruf")
            .with_context("Ein Detektiv ermittelt");
        let prompt = build_prompt(&chapter, 0, Genre::Roman, "beschreibend");
        assert!(prompt.contains("Rolle: Du bist ein Erzähler mit Fokus auf Beschreibungen."));
        assert!(prompt.contains("Kontext: Ein Detektiv ermittelt\n"));
        assert!(prompt.contains("Position im Buch: Kapitel 1: Der Anruf\n"));
        assert!(prompt.contains("(beschreibend)"));
        assert!(prompt.contains("Länge: Maximal 4000 Zeichen"));
    }

    #[test]
    fn test_build_prompt_without_title() {
        let chapter = Chapter::seed(4).with_context("Quanten");
        let prompt = build_prompt(&chapter, 3, Genre::Sachbuch, "unbekannt");
        assert!(prompt.contains("Position im Buch: Kapitel 4\n"));
        assert!(prompt.contains("Du bist ein Autor."));
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let chapter = Chapter::seed(1).with_context("Stadt bei Nacht");
        assert_eq!(
            build_prompt(&chapter, 0, Genre::Lyrik, "rhythmisch"),
            build_prompt(&chapter, 0, Genre::Lyrik, "rhythmisch")
        );
    }
}
