/*!
 * Character-segmenting analyzer.
 *
 * Splits text into one segment per grapheme cluster. Punctuation becomes a
 * labelled, non-interactive segment; newlines (including the escaped `\n`
 * marker) become dedicated line-break segments.
 */

use async_trait::async_trait;
use log::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::errors::AnalyzerError;
use crate::language::LanguageTag;
use crate::lexicon::Lexicon;
use crate::segment::{AnalysisResult, Segment, SegmentKind, NEWLINE_ESCAPE};

use super::{assemble, punctuation_label, Analyzer, Placeholder};

#[derive(Debug, Clone)]
pub struct CharacterAnalyzer {
    language: LanguageTag,
    lexicon: Lexicon,
    placeholder: Placeholder,
}

impl CharacterAnalyzer {
    pub fn new(language: LanguageTag, lexicon: Lexicon, placeholder: Placeholder) -> Self {
        Self {
            language,
            lexicon,
            placeholder,
        }
    }

    /// Segment the text, returning the segments and how many used the placeholder
    pub fn segment(&self, text: &str) -> (Vec<Segment>, usize) {
        let mut segments = Vec::new();
        let mut placeholders = 0;
        let mut graphemes = text.graphemes(true).peekable();
        let mut next_id = 1u32;

        while let Some(grapheme) = graphemes.next() {
            let id = next_id;
            next_id += 1;

            if grapheme == "\\" && graphemes.peek() == Some(&"n") {
                graphemes.next();
                segments.push(Segment::line_break(id, NEWLINE_ESCAPE, self.language));
                continue;
            }

            if matches!(grapheme, "\n" | "\r\n" | "\r") {
                segments.push(Segment::line_break(id, grapheme, self.language));
                continue;
            }

            if grapheme.trim().is_empty() {
                segments.push(Segment::whitespace(id, grapheme, self.language));
                continue;
            }

            if let Some(label) = punctuation_label(grapheme) {
                segments.push(Segment::punctuation(id, grapheme, label, self.language));
                continue;
            }

            let segment = match self.lexicon.lookup(grapheme) {
                Some(entry) => Segment::interactive(
                    id,
                    grapheme,
                    entry.pronunciation.clone(),
                    entry.definition.clone(),
                    self.language,
                    SegmentKind::Character,
                ),
                None => {
                    placeholders += 1;
                    Segment::interactive(
                        id,
                        grapheme,
                        self.placeholder.pronunciation.clone(),
                        self.placeholder.definition.clone(),
                        self.language,
                        SegmentKind::Character,
                    )
                    .with_placeholder(true)
                }
            };
            segments.push(segment);
        }

        (segments, placeholders)
    }
}

#[async_trait]
impl Analyzer for CharacterAnalyzer {
    fn language(&self) -> LanguageTag {
        self.language
    }

    fn name(&self) -> &str {
        "character"
    }

    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzerError> {
        let (segments, placeholders) = self.segment(text);
        debug!(
            "Character analysis produced {} segments ({} placeholder)",
            segments.len(),
            placeholders
        );
        Ok(assemble(self.language, text, segments, placeholders))
    }
}
