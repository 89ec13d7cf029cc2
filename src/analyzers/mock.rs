/*!
 * Mock analyzer implementations for testing.
 *
 * This module provides a mock analyzer that simulates different backend behaviors:
 * - `MockAnalyzer::working()` - Always succeeds with one segment per token
 * - `MockAnalyzer::failing()` - Always fails with a backend error
 * - `MockAnalyzer::slow(ms)` - Succeeds after a delay (for timeout and supersede testing)
 * - `MockAnalyzer::invalid()` - Returns segments that break the invariants
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::AnalyzerError;
use crate::language::LanguageTag;
use crate::segment::{AnalysisResult, Provenance, Segment, SegmentKind, NEWLINE_ESCAPE};

use super::Analyzer;

/// Behavior mode for the mock analyzer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with a backend error
    Failing,
    /// Rejects the input as malformed
    Malformed,
    /// Succeeds after a delay
    Slow { delay_ms: u64 },
    /// Produces an interactive segment without a definition
    Invalid,
    /// Emits the escaped newline marker between tokens
    EscapedNewlines,
}

/// Mock analyzer for testing pipeline behavior
#[derive(Debug, Clone)]
pub struct MockAnalyzer {
    language: LanguageTag,
    behavior: MockBehavior,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
}

impl MockAnalyzer {
    pub fn new(language: LanguageTag, behavior: MockBehavior) -> Self {
        Self {
            language,
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(LanguageTag::Other, MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(LanguageTag::Other, MockBehavior::Failing)
    }

    pub fn malformed() -> Self {
        Self::new(LanguageTag::Other, MockBehavior::Malformed)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(LanguageTag::Other, MockBehavior::Slow { delay_ms })
    }

    pub fn invalid() -> Self {
        Self::new(LanguageTag::Other, MockBehavior::Invalid)
    }

    pub fn escaped_newlines() -> Self {
        Self::new(LanguageTag::Other, MockBehavior::EscapedNewlines)
    }

    /// Bind the mock to another language
    pub fn for_language(mut self, language: LanguageTag) -> Self {
        self.language = language;
        self
    }

    /// Number of analyze calls received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn tokens_result(&self, text: &str, separator: Option<&str>) -> AnalysisResult {
        let mut segments = Vec::new();
        let mut id = 0u32;
        for (index, token) in text.split_whitespace().enumerate() {
            if index > 0 {
                id += 1;
                segments.push(match separator {
                    Some(marker) => Segment::line_break(id, marker, self.language),
                    None => Segment::whitespace(id, " ", self.language),
                });
            }
            id += 1;
            segments.push(Segment::interactive(
                id,
                token,
                None,
                format!("[MOCK] {}", token),
                self.language,
                SegmentKind::Word,
            ));
        }

        AnalysisResult::new(
            segments,
            format!("[LITERAL] {}", text),
            format!("[IDIOMATIC] {}", text),
            "",
            Provenance::Lexicon { placeholder_segments: 0 },
        )
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    fn language(&self) -> LanguageTag {
        self.language
    }

    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzerError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.tokens_result(text, None)),
            MockBehavior::Failing => Err(AnalyzerError::Backend("Simulated backend failure".to_string())),
            MockBehavior::Malformed => Err(AnalyzerError::MalformedInput("Simulated encoding rejection".to_string())),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                Ok(self.tokens_result(text, None))
            }
            MockBehavior::Invalid => {
                let mut segment = Segment::interactive(1, text, None, "x", self.language, SegmentKind::Word);
                segment.definition = None;
                Ok(AnalysisResult::new(
                    vec![segment],
                    "",
                    "",
                    "",
                    Provenance::Lexicon { placeholder_segments: 0 },
                ))
            }
            MockBehavior::EscapedNewlines => Ok(self.tokens_result(text, Some(NEWLINE_ESCAPE))),
        }
    }
}
