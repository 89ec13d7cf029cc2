/*!
 * Word-segmenting analyzer.
 *
 * Splits text on whitespace runs while keeping the runs as their own
 * segments, so concatenating the originals reproduces the input exactly.
 * Newlines inside a run become dedicated line-break segments.
 */

use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AnalyzerError;
use crate::language::LanguageTag;
use crate::lexicon::Lexicon;
use crate::segment::{AnalysisResult, Segment, SegmentKind, NEWLINE_ESCAPE};

use super::{assemble, punctuation_label, Analyzer, Placeholder};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

#[derive(Debug, Clone)]
pub struct WordAnalyzer {
    language: LanguageTag,
    lexicon: Lexicon,
    placeholder: Placeholder,
}

impl WordAnalyzer {
    pub fn new(language: LanguageTag, lexicon: Lexicon, placeholder: Placeholder) -> Self {
        Self {
            language,
            lexicon,
            placeholder,
        }
    }

    /// Segment the text, returning the segments and how many used the placeholder
    pub fn segment(&self, text: &str) -> (Vec<Segment>, usize) {
        let mut builder = SegmentBuilder::new(self.language);
        let mut placeholders = 0;
        let mut last = 0;

        for run in WHITESPACE_RUN.find_iter(text) {
            if run.start() > last {
                placeholders += self.push_token(&mut builder, &text[last..run.start()]);
            }
            builder.push_whitespace_run(run.as_str());
            last = run.end();
        }
        if last < text.len() {
            placeholders += self.push_token(&mut builder, &text[last..]);
        }

        (builder.segments, placeholders)
    }

    /// Push one non-whitespace token, returning 1 if it used the placeholder
    fn push_token(&self, builder: &mut SegmentBuilder, token: &str) -> usize {
        let id = builder.next_id();

        if token == NEWLINE_ESCAPE {
            builder.segments.push(Segment::line_break(id, token, self.language));
            return 0;
        }

        if let Some(label) = all_punctuation_label(token) {
            builder.segments.push(Segment::punctuation(id, token, label, self.language));
            return 0;
        }

        match self.lexicon.lookup(token) {
            Some(entry) => {
                builder.segments.push(Segment::interactive(
                    id,
                    token,
                    entry.pronunciation.clone(),
                    entry.definition.clone(),
                    self.language,
                    SegmentKind::Word,
                ));
                0
            }
            None => {
                builder.segments.push(
                    Segment::interactive(
                        id,
                        token,
                        self.placeholder.pronunciation.clone(),
                        self.placeholder.definition.clone(),
                        self.language,
                        SegmentKind::Word,
                    )
                    .with_placeholder(true),
                );
                1
            }
        }
    }
}

/// Label for a token made only of punctuation; a lone mark keeps its own label
fn all_punctuation_label(token: &str) -> Option<&'static str> {
    if let Some(label) = punctuation_label(token) {
        return Some(label);
    }
    let all_punctuation = token
        .chars()
        .all(|c| punctuation_label(c.encode_utf8(&mut [0; 4])).is_some());
    all_punctuation.then_some("punctuation")
}

struct SegmentBuilder {
    language: LanguageTag,
    segments: Vec<Segment>,
    counter: u32,
}

impl SegmentBuilder {
    fn new(language: LanguageTag) -> Self {
        Self {
            language,
            segments: Vec::new(),
            counter: 0,
        }
    }

    fn next_id(&mut self) -> u32 {
        self.counter += 1;
        self.counter
    }

    /// Split a whitespace run at newlines so each newline is its own segment
    fn push_whitespace_run(&mut self, run: &str) {
        let mut pending = String::new();
        let mut chars = run.chars().peekable();

        while let Some(c) = chars.next() {
            let line_break = match c {
                '\n' => Some("\n"),
                '\r' if chars.peek() == Some(&'\n') => {
                    chars.next();
                    Some("\r\n")
                }
                '\r' => Some("\r"),
                _ => None,
            };

            match line_break {
                Some(marker) => {
                    self.flush_whitespace(&mut pending);
                    let id = self.next_id();
                    self.segments.push(Segment::line_break(id, marker, self.language));
                }
                None => pending.push(c),
            }
        }
        self.flush_whitespace(&mut pending);
    }

    fn flush_whitespace(&mut self, pending: &mut String) {
        if pending.is_empty() {
            return;
        }
        let id = self.next_id();
        self.segments
            .push(Segment::whitespace(id, std::mem::take(pending), self.language));
    }
}

#[async_trait]
impl Analyzer for WordAnalyzer {
    fn language(&self) -> LanguageTag {
        self.language
    }

    fn name(&self) -> &str {
        "word"
    }

    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzerError> {
        let (segments, placeholders) = self.segment(text);
        debug!(
            "Word analysis for {} produced {} segments ({} placeholder)",
            self.language,
            segments.len(),
            placeholders
        );
        Ok(assemble(self.language, text, segments, placeholders))
    }
}
