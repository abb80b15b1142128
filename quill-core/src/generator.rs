//! Text generation backends
//!
//! [`TextGenerator`] is the seam a real language-model client would plug into.
//! [`SimulatedGenerator`] waits for a fixed latency and then produces
//! deterministic placeholder text sized to the chapter's depth of field.

use crate::error::{QuillError, Result};
use crate::types::{Chapter, Genre};
use async_trait::async_trait;
use std::time::Duration;

/// Latency the simulated backend waits before answering
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(1500);

/// Message shown when generation is requested without a context
pub const MISSING_CONTEXT: &str = "Bitte geben Sie einen Kontext für das Kapitel ein.";

const QUOTE_CHARS: usize = 50;

const FILLER: &str = "\nDieser Text wird je nach gewünschter Tiefenschärfe angepasst. In einem vollständig implementierten System würde hier ein KI-generierter Text erscheinen.";

/// Everything a backend needs to produce text for one chapter
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Snapshot of the chapter at the time generation started
    pub chapter: Chapter,
    pub genre: Genre,
    /// Authorial role resolved from genre and style
    pub role: String,
    /// Fully built prompt
    pub prompt: String,
}

/// A text generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce text for the request
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Backend name for logs
    fn name(&self) -> &str;
}

/// Fail fast when a chapter has no context to generate from
pub fn require_context(chapter: &Chapter) -> Result<()> {
    if chapter.context.trim().is_empty() {
        Err(QuillError::InvalidInput(MISSING_CONTEXT.to_string()))
    } else {
        Ok(())
    }
}

fn sample_paragraph(genre: Genre) -> &'static str {
    match genre {
        Genre::Roman => "Die Dunkelheit legte sich wie ein Schleier über die Stadt, während Maria durch die leeren Straßen lief. Ihre Schritte hallten von den Häuserwänden wider, ein einsamer Rhythmus in der Stille der Nacht. Sie hatte nicht vorgehabt, so spät noch unterwegs zu sein, aber die Nachricht auf ihrem Telefon ließ ihr keine Wahl.\n\n",
        Genre::Sachbuch => "Die Quantenphysik stellt unser intuitives Verständnis der Realität fundamental in Frage. Anders als in der klassischen Physik, wo Objekte definierte Positionen und Eigenschaften besitzen, existieren Quantenobjekte in einem Zustand der Superposition.\n\n",
        Genre::Drehbuch => "INT. BÜRO - NACHT\n\nDas Licht der Schreibtischlampe wirft lange Schatten an die Wand. MICHAEL (45), übernächtigt, Anzug zerknittert, starrt auf seinen Computerbildschirm.\n\n",
        Genre::Lyrik => "ZEITENWENDE\n\nZwischen den Sekunden\nwohnt eine Ewigkeit,\ndie niemand sieht.\n\n",
    }
}

/// Quote of the context's first 50 characters, ellipsized when longer
pub fn context_quote(context: &str) -> String {
    let mut quote: String = context.chars().take(QUOTE_CHARS).collect();
    if context.chars().count() > QUOTE_CHARS {
        quote.push_str("...");
    }
    format!("\"{}\"", quote)
}

/// Deterministic placeholder text for a chapter
///
/// The result holds at least `depth_of_field * 0.8` characters; the last
/// filler paragraph may overshoot.
pub fn simulated_text(chapter: &Chapter, genre: Genre, role: &str) -> String {
    let mut text =
        String::from("Dies ist ein vom KI-System generierter Text basierend auf dem Prompt:\n\n");
    text.push_str(&context_quote(&chapter.context));
    text.push_str("\n\n");
    text.push_str(&format!(
        "Als {} verfasse ich einen Text mit {} Zeichen zum angegebenen Thema:\n\n",
        role, chapter.depth_of_field
    ));
    text.push_str(sample_paragraph(genre));

    let threshold = chapter.depth_of_field as usize * 4 / 5;
    let mut length = text.chars().count();
    let filler_length = FILLER.chars().count();
    while length < threshold {
        text.push_str(FILLER);
        length += filler_length;
    }
    text
}

/// Backend that simulates a remote call
#[derive(Debug, Clone)]
pub struct SimulatedGenerator {
    latency: Duration,
}

impl SimulatedGenerator {
    pub fn new() -> Self {
        Self {
            latency: SIMULATED_LATENCY,
        }
    }

    /// Set the simulated latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for SimulatedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        require_context(&request.chapter)?;
        tokio::time::sleep(self.latency).await;
        Ok(simulated_text(&request.chapter, request.genre, &request.role))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEPTH_OF_FIELD_STEPS;

    fn request(context: &str) -> GenerationRequest {
        GenerationRequest {
            chapter: Chapter::seed(1).with_context(context),
            genre: Genre::Roman,
            role: "Autor".to_string(),
            prompt: String::new(),
        }
    }

    #[test]
    fn test_length_reaches_threshold() {
        for genre in Genre::ALL {
            for depth in DEPTH_OF_FIELD_STEPS {
                let chapter = Chapter::seed(1)
                    .with_context("Kontext")
                    .with_depth_of_field(depth)
                    .unwrap();
                let text = simulated_text(&chapter, genre, "Autor");
                assert!(text.chars().count() as f64 >= depth as f64 * 0.8);
            }
        }
    }

    #[test]
    fn test_context_quote_is_ellipsized() {
        assert_eq!(context_quote("kurz"), "\"kurz\"");
        let long = "ä".repeat(60);
        assert_eq!(context_quote(&long), format!("\"{}...\"", "ä".repeat(50)));
        assert_eq!(context_quote(&"x".repeat(50)), format!("\"{}\"", "x".repeat(50)));
    }

    #[test]
    fn test_sample_paragraph_per_genre() {
        let chapter = Chapter::seed(1).with_context("Szene");
        assert!(simulated_text(&chapter, Genre::Drehbuch, "Autor").contains("INT. BÜRO - NACHT"));
        assert!(simulated_text(&chapter, Genre::Lyrik, "Autor").contains("ZEITENWENDE"));
        assert!(simulated_text(&chapter, Genre::Sachbuch, "Autor").contains("Quantenphysik"));
        let roman = simulated_text(&chapter, Genre::Roman, "Bildhafter Erzähler");
        assert!(roman.contains("Als Bildhafter Erzähler verfasse ich"));
    }

    #[tokio::test]
    async fn test_simulated_generator_rejects_empty_context() {
        let generator = SimulatedGenerator::new().with_latency(Duration::ZERO);
        let err = generator.generate(&request("   ")).await.unwrap_err();
        assert!(matches!(err, QuillError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_simulated_generator_waits_for_latency() {
        let latency = Duration::from_millis(50);
        let generator = SimulatedGenerator::new().with_latency(latency);
        let started = tokio::time::Instant::now();
        let text = generator.generate(&request("Ein Detektiv ermittelt")).await.unwrap();
        assert!(started.elapsed() >= latency);
        assert!(text.contains("\"Ein Detektiv ermittelt\""));
    }
}
