//! Genre of a manuscript

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Literary genre; drives style options, role names, sample text and formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    /// Novel
    #[default]
    Roman,

    /// Non-fiction
    Sachbuch,

    /// Screenplay
    Drehbuch,

    /// Poetry
    Lyrik,
}

impl Genre {
    pub const ALL: [Genre; 4] = [Genre::Roman, Genre::Sachbuch, Genre::Drehbuch, Genre::Lyrik];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Roman => "roman",
            Genre::Sachbuch => "sachbuch",
            Genre::Drehbuch => "drehbuch",
            Genre::Lyrik => "lyrik",
        }
    }

    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Genre::Roman => "Roman",
            Genre::Sachbuch => "Sachbuch",
            Genre::Drehbuch => "Drehbuch",
            Genre::Lyrik => "Lyrik",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownGenre(s.to_string()))
    }
}
