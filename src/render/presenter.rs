//! Formatting of the literal/idiomatic translation pair and the notes.

use serde::Serialize;

use crate::app_config::RenderConfig;
use crate::language::LanguageTag;
use crate::segment::AnalysisResult;

pub const NO_NOTES_MESSAGE: &str = "No specific notes available for this text yet.";

/// Headings and bodies ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationView {
    pub literal_heading: String,
    pub literal: String,
    pub idiomatic_heading: String,
    pub idiomatic: String,
    pub notes_heading: String,
    pub notes: String,
}

impl TranslationView {
    pub fn to_text(&self) -> String {
        format!(
            "== {} ==\n{}\n\n== {} ==\n{}\n\n== {} ==\n{}",
            self.literal_heading,
            self.literal,
            self.idiomatic_heading,
            self.idiomatic,
            self.notes_heading,
            self.notes
        )
    }
}

#[derive(Debug, Clone)]
pub struct TranslationPresenter {
    target_language_label: String,
}

impl TranslationPresenter {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            target_language_label: config.target_language_label.clone(),
        }
    }

    pub fn present(&self, result: &AnalysisResult, language: LanguageTag) -> TranslationView {
        let notes = if result.notes().trim().is_empty() {
            NO_NOTES_MESSAGE.to_string()
        } else {
            result.notes().to_string()
        };

        TranslationView {
            literal_heading: format!("{} (Literal) Translation", language.display_name()),
            literal: result.literal_translation().to_string(),
            idiomatic_heading: format!("{} (Idiomatic) Translation", self.target_language_label),
            idiomatic: result.idiomatic_translation().to_string(),
            notes_heading: "Contextual Notes".to_string(),
            notes,
        }
    }
}

impl Default for TranslationPresenter {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}
