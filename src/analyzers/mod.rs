/*!
 * Language analyzers.
 *
 * An analyzer turns raw text into an [`AnalysisResult`]. There is one
 * implementation per segmentation style:
 * - `character`: one segment per grapheme (Chinese)
 * - `word`: whitespace-delimited tokens with whitespace preserved
 *   (Hindi, Telugu, Portuguese and the generic fallback)
 *
 * `fixtures` holds the curated example texts and `mock` a configurable
 * analyzer for exercising failure paths.
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::app_config::PlaceholderConfig;
use crate::errors::AnalyzerError;
use crate::language::{LanguageTag, SegmentationStyle};
use crate::lexicon::Lexicon;
use crate::segment::{AnalysisResult, Provenance, Segment};

pub mod character;
pub mod fixtures;
pub mod mock;
pub mod word;

pub use character::CharacterAnalyzer;
pub use mock::{MockAnalyzer, MockBehavior};
pub use word::WordAnalyzer;

/// Common trait for all language analyzers
///
/// `analyze` must be total over non-empty trimmed input for the bundled
/// analyzers; the error path exists for backends that can time out or
/// reject input.
#[async_trait]
pub trait Analyzer: Send + Sync + Debug {
    /// Language this analyzer was built for
    fn language(&self) -> LanguageTag;

    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Analyze the text into ordered segments, translations and notes
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzerError>;
}

/// Annotation applied to units the lexicon does not know
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub pronunciation: Option<String>,
    pub definition: String,
}

impl Placeholder {
    /// Placeholder for a segmentation style, taken from configuration
    pub fn from_config(config: &PlaceholderConfig, style: SegmentationStyle) -> Self {
        let pronunciation = match style {
            SegmentationStyle::Character => config.character_pronunciation.clone(),
            SegmentationStyle::Word => config.word_pronunciation.clone(),
        };
        Self {
            pronunciation,
            definition: config.definition.clone(),
        }
    }
}

/// Build the analyzer for a language from its segmentation style
pub fn analyzer_for(
    language: LanguageTag,
    lexicon: Lexicon,
    placeholder_config: &PlaceholderConfig,
) -> Arc<dyn Analyzer> {
    let style = language.segmentation();
    let placeholder = Placeholder::from_config(placeholder_config, style);
    match style {
        SegmentationStyle::Character => Arc::new(CharacterAnalyzer::new(language, lexicon, placeholder)),
        SegmentationStyle::Word => Arc::new(WordAnalyzer::new(language, lexicon, placeholder)),
    }
}

/// Generic label for a punctuation unit, `None` if the unit is not punctuation
pub fn punctuation_label(unit: &str) -> Option<&'static str> {
    let mut chars = unit.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let label = match ch {
        '，' | ',' => "comma",
        '。' | '.' | '．' => "period",
        '！' | '!' => "exclamation mark",
        '？' | '?' => "question mark",
        '、' => "enumeration comma",
        '；' | ';' => "semicolon",
        '：' | ':' => "colon",
        '「' | '」' | '『' | '』' | '"' | '“' | '”' => "quotation mark",
        '（' | '）' | '(' | ')' => "parenthesis",
        '《' | '》' | '〈' | '〉' => "title mark",
        '…' => "ellipsis",
        '—' | '–' => "dash",
        '।' | '॥' => "danda",
        _ if ch.is_ascii_punctuation() => "punctuation",
        '\u{3001}'..='\u{303F}' => "punctuation",
        '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205E}' => "punctuation",
        '\u{FF01}'..='\u{FF0F}'
        | '\u{FF1A}'..='\u{FF20}'
        | '\u{FF3B}'..='\u{FF40}'
        | '\u{FF5B}'..='\u{FF65}' => "punctuation",
        '¡' | '¿' | '«' | '»' => "punctuation",
        _ => return None,
    };
    Some(label)
}

/// Assemble the final result, attaching fixture translations when the text is a known example
pub(crate) fn assemble(
    language: LanguageTag,
    text: &str,
    segments: Vec<Segment>,
    placeholder_segments: usize,
) -> AnalysisResult {
    if let Some(fixture) = fixtures::find(language, text) {
        return AnalysisResult::new(
            segments,
            fixture.literal_translation,
            fixture.idiomatic_translation,
            fixture.notes,
            Provenance::Curated {
                fixture: fixture.name.to_string(),
            },
        );
    }

    let (literal, idiomatic, notes) = fixtures::placeholder_texts(language);
    AnalysisResult::new(
        segments,
        literal,
        idiomatic,
        notes,
        Provenance::Lexicon { placeholder_segments },
    )
}
