//! Book format catalog and pagination estimates

use crate::error::{ParseError, Result};
use crate::types::{BookFormat, Chapter, Genre};
use std::sync::OnceLock;

/// Characters per page assumed when no format is selected
pub const DEFAULT_CHARACTERS_PER_PAGE: usize = 2000;

/// Page size (width, height in cm) assumed when no format is selected
pub const DEFAULT_DIMENSIONS: (f64, f64) = (13.5, 21.0);

// (name, dimensions, characters per page, suitable for)
type Entry = (&'static str, &'static str, &'static str, &'static str);

const ROMAN: [Entry; 3] = [
    ("Taschenbuch", "12,5 x 19", "1.800", "Belletristik"),
    ("Trade Paperback", "13,5 x 21", "2.200", "Hardcover Roman"),
    ("Premium", "15,5 x 23", "2.600", "Geschenkausgabe"),
];

const SACHBUCH: [Entry; 3] = [
    ("DIN A5", "14,8 x 21", "2.000", "Ratgeber, kompakt"),
    ("Standard", "15 x 22", "2.400", "Wissenschaftlich"),
    ("Großformat", "17 x 24", "2.800", "Bildlastige Bücher"),
];

const DREHBUCH: [Entry; 3] = [
    ("DIN A4", "21 x 29,7", "1.600", "Arbeitsfassung, Einreichung"),
    ("US Letter", "21,6 x 27,9", "1.500", "Internationale Produktion"),
    ("Lesefassung", "14,8 x 21", "1.400", "Veröffentlichtes Drehbuch"),
];

const LYRIK: [Entry; 3] = [
    ("Kleinformat", "11 x 18", "900", "Gedichtband"),
    ("Quadrat", "17 x 17", "1.100", "Illustrierte Lyrik"),
    ("Bibliophil", "13,5 x 21", "1.200", "Sammlerausgabe"),
];

fn entries(genre: Genre) -> &'static [Entry; 3] {
    match genre {
        Genre::Roman => &ROMAN,
        Genre::Sachbuch => &SACHBUCH,
        Genre::Drehbuch => &DREHBUCH,
        Genre::Lyrik => &LYRIK,
    }
}

fn build(genre: Genre) -> Vec<BookFormat> {
    entries(genre)
        .iter()
        .map(|(name, dimensions, cpp, suitable)| {
            BookFormat::new(*name, *dimensions, *cpp).with_suitable_for(*suitable)
        })
        .collect()
}

/// Formats offered for a genre
pub fn formats_for(genre: Genre) -> &'static [BookFormat] {
    static CATALOG: OnceLock<[Vec<BookFormat>; 4]> = OnceLock::new();
    let catalog = CATALOG.get_or_init(|| Genre::ALL.map(build));
    let slot = Genre::ALL
        .iter()
        .position(|g| *g == genre)
        .unwrap_or_default();
    &catalog[slot]
}

/// Look up a format of a genre by name, ignoring case
pub fn find_format(genre: Genre, name: &str) -> Option<&'static BookFormat> {
    formats_for(genre)
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(name))
}

/// Parse "1.800" (German thousands separator) into 1800
pub fn parse_characters_per_page(value: &str) -> Result<usize> {
    let digits: String = value.trim().chars().filter(|c| *c != '.').collect();
    match digits.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::InvalidFormat(format!("characters per page '{}'", value)).into()),
    }
}

/// Parse "12,5 x 19" (decimal comma, cm) into (12.5, 19.0)
pub fn parse_dimensions(value: &str) -> Result<(f64, f64)> {
    let invalid = || ParseError::InvalidFormat(format!("dimensions '{}'", value));
    let (width, height) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let number = |s: &str| s.trim().replace(',', ".").parse::<f64>().map_err(|_| invalid());
    Ok((number(width)?, number(height)?))
}

/// Page estimate for a chapter in a format
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterPreview {
    pub chapter_id: u32,
    pub title: String,
    pub total_characters: usize,
    pub target_characters: u32,
    pub estimated_pages: usize,
    /// Page width divided by height
    pub aspect_ratio: f64,
    pub has_content: bool,
}

impl ChapterPreview {
    /// Estimate pages for `chapter`, using defaults when no format is given
    pub fn new(chapter: &Chapter, format: Option<&BookFormat>) -> Result<Self> {
        let (characters_per_page, (width, height)) = match format {
            Some(f) => (
                parse_characters_per_page(&f.characters_per_page)?,
                parse_dimensions(&f.dimensions)?,
            ),
            None => (DEFAULT_CHARACTERS_PER_PAGE, DEFAULT_DIMENSIONS),
        };
        let total_characters = chapter.character_count();

        Ok(Self {
            chapter_id: chapter.id,
            title: if chapter.title.is_empty() {
                "Unbenannt".to_string()
            } else {
                chapter.title.clone()
            },
            total_characters,
            target_characters: chapter.depth_of_field,
            estimated_pages: total_characters.div_ceil(characters_per_page),
            aspect_ratio: width / height,
            has_content: chapter.sections.iter().any(|s| !s.content.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Section;

    #[test]
    fn test_catalog_covers_every_genre() {
        for genre in Genre::ALL {
            let formats = formats_for(genre);
            assert_eq!(formats.len(), 3);
            for format in formats {
                assert!(parse_characters_per_page(&format.characters_per_page).is_ok());
                assert!(parse_dimensions(&format.dimensions).is_ok());
                assert!(format.suitable_for.is_some());
            }
        }
        assert_eq!(formats_for(Genre::Roman)[0].name, "Taschenbuch");
        assert_eq!(find_format(Genre::Sachbuch, "din a5").unwrap().dimensions, "14,8 x 21");
        assert!(find_format(Genre::Lyrik, "Taschenbuch").is_none());
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_characters_per_page("1.800").unwrap(), 1800);
        assert_eq!(parse_characters_per_page("900").unwrap(), 900);
        assert!(parse_characters_per_page("viele").is_err());
        assert_eq!(parse_dimensions("12,5 x 19").unwrap(), (12.5, 19.0));
        assert!(parse_dimensions("A4").is_err());
    }

    #[test]
    fn test_preview_estimates_pages() {
        let chapter = Chapter::seed(1).with_sections(vec![
            Section::new(1).with_content("a".repeat(2000)),
            Section::new(2).with_content("b".repeat(1700)),
        ]);
        let format = &formats_for(Genre::Roman)[0];
        let preview = ChapterPreview::new(&chapter, Some(format)).unwrap();
        assert_eq!(preview.total_characters, 3700);
        assert_eq!(preview.estimated_pages, 3);
        assert!((preview.aspect_ratio - 12.5 / 19.0).abs() < 1e-9);
        assert!(preview.has_content);
        assert_eq!(preview.title, "Unbenannt");

        let preview = ChapterPreview::new(&chapter, None).unwrap();
        assert_eq!(preview.estimated_pages, 2);
    }

    #[test]
    fn test_preview_of_empty_chapter() {
        let preview = ChapterPreview::new(&Chapter::seed(1), None).unwrap();
        assert_eq!(preview.estimated_pages, 0);
        assert!(!preview.has_content);
    }
}
