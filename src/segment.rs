/*!
 * Core data model for annotated text.
 *
 * A [`Segment`] is one displayable unit of analyzed text: a character, a
 * word, a punctuation mark, a whitespace run or a line break. An
 * [`AnalysisResult`] is the immutable output of one analyzer invocation.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::AnalyzerError;
use crate::language::LanguageTag;

/// Escaped newline marker some analyzers emit instead of a real line break
pub const NEWLINE_ESCAPE: &str = "\\n";

/// Identifier of a segment, unique within one result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u32);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of text a segment covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Character,
    Word,
    Punctuation,
    Whitespace,
    LineBreak,
}

/// One displayable unit of analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,

    /// Literal text of the unit
    pub original: String,

    /// Phonetic rendering (pinyin, romanization)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,

    /// Gloss, or a generic label for punctuation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    pub language: LanguageTag,

    /// Whether the unit exposes a detail lookup
    #[serde(default)]
    pub interactive: bool,

    pub kind: SegmentKind,

    /// Annotation came from the placeholder policy rather than a lexicon
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
}

impl Segment {
    /// Interactive unit with linguistic content
    pub fn interactive(
        id: u32,
        original: impl Into<String>,
        pronunciation: Option<String>,
        definition: impl Into<String>,
        language: LanguageTag,
        kind: SegmentKind,
    ) -> Self {
        Self {
            id: SegmentId(id),
            original: original.into(),
            pronunciation,
            definition: Some(definition.into()),
            language,
            interactive: true,
            kind,
            placeholder: false,
        }
    }

    /// Punctuation mark carrying a generic label such as "comma"
    pub fn punctuation(id: u32, original: impl Into<String>, label: &str, language: LanguageTag) -> Self {
        Self {
            id: SegmentId(id),
            original: original.into(),
            pronunciation: None,
            definition: Some(label.to_string()),
            language,
            interactive: false,
            kind: SegmentKind::Punctuation,
            placeholder: false,
        }
    }

    pub fn whitespace(id: u32, original: impl Into<String>, language: LanguageTag) -> Self {
        Self {
            id: SegmentId(id),
            original: original.into(),
            pronunciation: None,
            definition: None,
            language,
            interactive: false,
            kind: SegmentKind::Whitespace,
            placeholder: false,
        }
    }

    /// Line break carrying the given original text (`\n`, `\r\n` or the escape marker)
    pub fn line_break(id: u32, original: impl Into<String>, language: LanguageTag) -> Self {
        Self {
            id: SegmentId(id),
            original: original.into(),
            pronunciation: None,
            definition: None,
            language,
            interactive: false,
            kind: SegmentKind::LineBreak,
            placeholder: false,
        }
    }

    /// Mark the annotation as coming from the placeholder policy
    pub fn with_placeholder(mut self, placeholder: bool) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Whether this segment denotes a line break, escaped or real
    pub fn is_line_break(&self) -> bool {
        self.kind == SegmentKind::LineBreak
            || self.original == NEWLINE_ESCAPE
            || self.original == "\n"
            || self.original == "\r\n"
    }

    /// Check the segment invariants
    pub fn check(&self) -> Result<(), AnalyzerError> {
        if self.interactive {
            let has_definition = self
                .definition
                .as_deref()
                .is_some_and(|d| !d.trim().is_empty());
            if !has_definition {
                return Err(AnalyzerError::InvariantViolation(format!(
                    "interactive segment {} ('{}') has no definition",
                    self.id, self.original
                )));
            }
        }

        if self.is_line_break()
            && (self.interactive || self.pronunciation.is_some() || self.definition.is_some())
        {
            return Err(AnalyzerError::InvariantViolation(format!(
                "line break segment {} carries annotations",
                self.id
            )));
        }

        Ok(())
    }
}

/// Where the annotations of a result came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Provenance {
    /// A known example text with hand-written translations and notes
    Curated { fixture: String },
    /// Generic segmentation; translations are placeholders
    Lexicon { placeholder_segments: usize },
}

impl Provenance {
    pub fn is_curated(&self) -> bool {
        matches!(self, Self::Curated { .. })
    }
}

/// Immutable output of one analyzer invocation.
///
/// Fields are private so a result cannot be patched after construction;
/// a new analysis produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    segments: Vec<Segment>,
    literal_translation: String,
    idiomatic_translation: String,
    #[serde(default)]
    notes: String,
    provenance: Provenance,
}

impl AnalysisResult {
    pub fn new(
        segments: Vec<Segment>,
        literal_translation: impl Into<String>,
        idiomatic_translation: impl Into<String>,
        notes: impl Into<String>,
        provenance: Provenance,
    ) -> Self {
        Self {
            segments,
            literal_translation: literal_translation.into(),
            idiomatic_translation: idiomatic_translation.into(),
            notes: notes.into(),
            provenance,
        }
    }

    /// Segments in reading order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn literal_translation(&self) -> &str {
        &self.literal_translation
    }

    pub fn idiomatic_translation(&self) -> &str {
        &self.idiomatic_translation
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn find(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn interactive_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.interactive)
    }

    /// Concatenate the originals in order
    pub fn reconstruct(&self) -> String {
        self.segments.iter().map(|s| s.original.as_str()).collect()
    }

    /// Consume the result into its segments, for building a successor value
    pub fn into_parts(self) -> (Vec<Segment>, String, String, String, Provenance) {
        (
            self.segments,
            self.literal_translation,
            self.idiomatic_translation,
            self.notes,
            self.provenance,
        )
    }

    /// Check every segment invariant plus id uniqueness
    pub fn check(&self) -> Result<(), AnalyzerError> {
        let mut seen = std::collections::HashSet::with_capacity(self.segments.len());
        for segment in &self.segments {
            segment.check()?;
            if !seen.insert(segment.id) {
                return Err(AnalyzerError::InvariantViolation(format!(
                    "duplicate segment id {}",
                    segment.id
                )));
            }
        }
        Ok(())
    }
}

/// Opaque payload handed to whoever persists analyzed texts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePayload {
    pub id: Uuid,
    pub text: String,
    pub language: LanguageTag,
    pub result: AnalysisResult,
    pub created_at: DateTime<Utc>,
}

impl SavePayload {
    pub fn new(text: &str, language: LanguageTag, result: AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            language,
            result,
            created_at: Utc::now(),
        }
    }
}
