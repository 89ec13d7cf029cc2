/*!
 * Curated example texts.
 *
 * Each fixture pairs a known input with hand-written translations and
 * notes. Per-unit annotations for these texts live in the built-in
 * lexicons, so a fixture only decides the translation triple.
 */

use crate::language::LanguageTag;

/// A known example text with curated translations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    pub name: &'static str,
    pub language: LanguageTag,
    pub text: &'static str,
    pub literal_translation: &'static str,
    pub idiomatic_translation: &'static str,
    pub notes: &'static str,
}

pub const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "red-beans",
        language: LanguageTag::Chinese,
        text: "紅豆生南國，春來發幾枝。\n願君多采擷，此物最相思。",
        literal_translation: "Red bean grow south country. Spring come open-up several branch. Wish you much pick-gather. This thing most miss-think.",
        idiomatic_translation: "Red beans grow in southern lands,\nWhen spring arrives, they shoot forth many branches.\nI hope you will gather them aplenty,\nFor these are the truest tokens of longing.",
        notes: "This famous poem, 'Red Beans' (相思 - Xiāngsī) by Wang Wei (王維), is a classic expression of longing and love. The red bean (Ormosia hosiei) is often associated with lovesickness or deep affection in Chinese culture.",
    },
    Fixture {
        name: "hindi-greeting",
        language: LanguageTag::Hindi,
        text: "नमस्ते दुनियाँ",
        literal_translation: "Greetings World",
        idiomatic_translation: "Hello World",
        notes: "A common Hindi greeting.",
    },
    Fixture {
        name: "telugu-greeting",
        language: LanguageTag::Telugu,
        text: "నమస్కారం ప్రపంచం",
        literal_translation: "Greetings World",
        idiomatic_translation: "Hello World",
        notes: "A common Telugu greeting.",
    },
    Fixture {
        name: "portuguese-greeting",
        language: LanguageTag::Portuguese,
        text: "Olá Mundo",
        literal_translation: "Hello World",
        idiomatic_translation: "Hello World",
        notes: "A common Portuguese greeting.",
    },
];

/// Find the fixture whose text equals the input, ignoring surrounding whitespace and CRLF
pub fn find(language: LanguageTag, text: &str) -> Option<&'static Fixture> {
    let normalized = text.trim().replace("\r\n", "\n");
    FIXTURES
        .iter()
        .find(|f| f.language == language && f.text == normalized)
}

/// Translation triple used when no fixture matches
pub fn placeholder_texts(language: LanguageTag) -> (String, String, String) {
    match language {
        LanguageTag::Other => (
            "Placeholder literal translation.".to_string(),
            "Placeholder idiomatic translation.".to_string(),
            "Contextual notes for this text.".to_string(),
        ),
        _ => {
            let name = language.display_name();
            (
                format!("Placeholder literal {} translation.", name),
                format!("Placeholder idiomatic {} translation.", name),
                format!("Contextual notes for this {} text.", name),
            )
        }
    }
}
