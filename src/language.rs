use isolang::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AnalysisError;

/// Language tag handling for the supported text languages
///
/// The set of tags is closed: every tag selects one segmentation rule and
/// one rendering style. Besides the tag names, ISO 639-1 and ISO 639-2
/// codes for the supported languages are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    #[default]
    Chinese,
    Hindi,
    Telugu,
    Portuguese,
    Other,
}

/// How an analyzer cuts text into segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationStyle {
    /// One segment per grapheme
    Character,
    /// Whitespace-delimited tokens, whitespace kept as its own segments
    Word,
}

impl LanguageTag {
    /// All tags in display order
    pub const ALL: [LanguageTag; 5] = [
        Self::Chinese,
        Self::Hindi,
        Self::Telugu,
        Self::Portuguese,
        Self::Other,
    ];

    /// Lowercase identifier, as used in configuration and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chinese => "chinese",
            Self::Hindi => "hindi",
            Self::Telugu => "telugu",
            Self::Portuguese => "portuguese",
            Self::Other => "other",
        }
    }

    /// English display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Chinese => "Chinese",
            Self::Hindi => "Hindi",
            Self::Telugu => "Telugu",
            Self::Portuguese => "Portuguese",
            Self::Other => "Other/English",
        }
    }

    /// Name of the language in its own script
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::Chinese => "中文",
            Self::Hindi => "हिन्दी",
            Self::Telugu => "తెలుగు",
            Self::Portuguese => "Português",
            Self::Other => "English",
        }
    }

    /// ISO 639-1 code of the language, `None` for the fallback tag
    pub fn iso_code(&self) -> Option<&'static str> {
        let part3 = match self {
            Self::Chinese => "zho",
            Self::Hindi => "hin",
            Self::Telugu => "tel",
            Self::Portuguese => "por",
            Self::Other => return None,
        };
        Language::from_639_3(part3).and_then(|lang| lang.to_639_1())
    }

    pub fn segmentation(&self) -> SegmentationStyle {
        match self {
            Self::Chinese => SegmentationStyle::Character,
            Self::Hindi | Self::Telugu | Self::Portuguese | Self::Other => SegmentationStyle::Word,
        }
    }

    /// Whether pronunciation is rendered as ruby text above the original
    pub fn uses_ruby(&self) -> bool {
        matches!(self, Self::Chinese)
    }

    /// Label shown next to the pronunciation in a detail card
    pub fn pronunciation_label(&self) -> &'static str {
        match self {
            Self::Chinese => "pinyin",
            _ => "pronunciation",
        }
    }

    /// Preferred font stack for text in this language
    pub fn font_family(&self) -> &'static str {
        match self {
            Self::Hindi => "\"Noto Sans Devanagari\", sans-serif",
            Self::Telugu => "\"Noto Sans Telugu\", sans-serif",
            _ => "sans-serif",
        }
    }

    /// Sample text offered when the language is selected
    pub fn example_text(&self) -> &'static str {
        match self {
            Self::Chinese => "紅豆生南國，春來發幾枝。\n願君多采擷，此物最相思。",
            Self::Hindi => "नमस्ते दुनियाँ",
            Self::Telugu => "నమస్కారం ప్రపంచం",
            Self::Portuguese => "Olá Mundo",
            Self::Other => "Hello World",
        }
    }

    /// Parse a tag, mapping anything unrecognized to [`LanguageTag::Other`]
    ///
    /// This is the resolution path used by user-facing callers, where a
    /// missing or unknown tag means "treat the text generically".
    pub fn parse_lenient(tag: &str) -> Self {
        tag.parse().unwrap_or(Self::Other)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LanguageTag {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();

        match normalized.as_str() {
            "chinese" => return Ok(Self::Chinese),
            "hindi" => return Ok(Self::Hindi),
            "telugu" => return Ok(Self::Telugu),
            "portuguese" => return Ok(Self::Portuguese),
            "other" | "english" => return Ok(Self::Other),
            _ => {}
        }

        let part3 = normalize_to_part3(&normalized)
            .ok_or_else(|| AnalysisError::UnsupportedLanguageTag(s.to_string()))?;

        match part3.as_str() {
            "zho" | "cmn" | "lzh" | "yue" => Ok(Self::Chinese),
            "hin" => Ok(Self::Hindi),
            "tel" => Ok(Self::Telugu),
            "por" => Ok(Self::Portuguese),
            "eng" => Ok(Self::Other),
            _ => Err(AnalysisError::UnsupportedLanguageTag(s.to_string())),
        }
    }
}

/// Normalize an ISO 639-1 or ISO 639-2 code to its 3-letter form
fn normalize_to_part3(code: &str) -> Option<String> {
    match code.len() {
        2 => Language::from_639_1(code).map(|lang| lang.to_639_3().to_string()),
        3 => {
            // ISO 639-2/B codes that differ from their /T counterpart
            let part2t = match code {
                "chi" => "zho",
                "fre" => "fra",
                "ger" => "deu",
                other => other,
            };
            Language::from_639_3(part2t).map(|lang| lang.to_639_3().to_string())
        }
        _ => None,
    }
}
