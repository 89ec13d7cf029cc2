/*!
 * Pronunciation and definition lookup.
 *
 * A lexicon is the pluggable boundary between segmentation and real
 * dictionary content. The built-in lexicons cover the bundled example
 * texts; richer ones can be loaded from JSON files and layered on top.
 */

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::errors::LexiconError;
use crate::language::LanguageTag;

/// Annotation for one lexicon key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    pub definition: String,
}

impl LexiconEntry {
    pub fn new(pronunciation: &str, definition: &str) -> Self {
        Self {
            pronunciation: Some(pronunciation.to_string()),
            definition: definition.to_string(),
        }
    }
}

/// Map from normalized text unit to its annotation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in lexicon for a language
    pub fn builtin(language: LanguageTag) -> Self {
        match language {
            LanguageTag::Chinese => CHINESE.clone(),
            LanguageTag::Hindi => HINDI.clone(),
            LanguageTag::Telugu => TELUGU.clone(),
            LanguageTag::Portuguese => PORTUGUESE.clone(),
            LanguageTag::Other => Lexicon::new(),
        }
    }

    /// Load entries from a JSON object of `key -> {pronunciation, definition}`
    pub fn from_json_file(path: &Path) -> Result<Self, LexiconError> {
        let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let lexicon = Self::parse(&content, &path.display().to_string())?;
        debug!("Loaded {} lexicon entries from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    pub fn from_json_str(content: &str) -> Result<Self, LexiconError> {
        Self::parse(content, INLINE_SOURCE)
    }

    /// Parse entries, rejecting any entry whose definition is blank
    fn parse(content: &str, origin: &str) -> Result<Self, LexiconError> {
        let raw: HashMap<String, LexiconEntry> =
            serde_json::from_str(content).map_err(|source| LexiconError::Parse {
                path: origin.to_string(),
                source,
            })?;

        let mut lexicon = Self::new();
        for (key, entry) in raw {
            if entry.definition.trim().is_empty() {
                return Err(LexiconError::InvalidEntry {
                    path: origin.to_string(),
                    key,
                });
            }
            lexicon.insert(&key, entry);
        }
        Ok(lexicon)
    }

    /// Layer `other` over this lexicon; its entries win on conflicts
    pub fn merged(mut self, other: Lexicon) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn insert(&mut self, key: &str, entry: LexiconEntry) {
        self.entries.insert(normalize_key(key), entry);
    }

    /// Look up a grapheme or word
    pub fn lookup(&self, unit: &str) -> Option<&LexiconEntry> {
        self.entries
            .get(unit)
            .or_else(|| self.entries.get(&normalize_key(unit)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Origin reported for lexicons parsed from a string
const INLINE_SOURCE: &str = "<inline>";

/// Lowercase and strip surrounding punctuation so "Mundo!" finds "mundo"
pub fn normalize_key(unit: &str) -> String {
    let trimmed = unit.trim().trim_matches(|c: char| {
        c.is_ascii_punctuation() || matches!(c, '¡' | '¿' | '«' | '»' | '।' | '॥' | '“' | '”')
    });
    if trimmed.is_empty() {
        unit.trim().to_lowercase()
    } else {
        trimmed.to_lowercase()
    }
}

fn build(entries: &[(&str, &str, &str)]) -> Lexicon {
    let mut lexicon = Lexicon::new();
    for (key, pronunciation, definition) in entries {
        lexicon.insert(key, LexiconEntry::new(pronunciation, definition));
    }
    lexicon
}

static CHINESE: Lazy<Lexicon> = Lazy::new(|| {
    build(&[
        ("紅", "hóng", "red; bonus; popular"),
        ("豆", "dòu", "bean; pea"),
        ("生", "shēng", "to be born; to give birth; life; to grow"),
        ("南", "nán", "south"),
        ("國", "guó", "country; state; nation"),
        ("春", "chūn", "spring (season); gay; joyful"),
        ("來", "lái", "to come; to arrive"),
        ("發", "fā", "to send out; to show (one's feeling); to issue"),
        ("幾", "jǐ", "how many; several; a few"),
        ("枝", "zhī", "branch; classifier for sticks, rods, pencils"),
        ("願", "yuàn", "to hope; to wish; to desire"),
        ("君", "jūn", "monarch; lord; gentleman; you (polite)"),
        ("多", "duō", "many; much; a lot of"),
        ("采", "cǎi", "to pick; to gather; to pluck"),
        ("擷", "xié", "to pick; to collect"),
        ("此", "cǐ", "this; these"),
        ("物", "wù", "thing; object; matter"),
        ("最", "zuì", "most; the most; -est"),
        ("相", "xiāng", "each other; one another; mutually"),
        ("思", "sī", "to think; to consider; to miss"),
    ])
});

static HINDI: Lazy<Lexicon> = Lazy::new(|| {
    build(&[
        ("नमस्ते", "na-mas-te", "Hello / Greetings"),
        ("दुनियाँ", "du-ni-yaan", "World"),
    ])
});

static TELUGU: Lazy<Lexicon> = Lazy::new(|| {
    build(&[
        ("నమస్కారం", "na-mas-kaa-ram", "Hello / Greetings"),
        ("ప్రపంచం", "pra-pan-cham", "World"),
    ])
});

static PORTUGUESE: Lazy<Lexicon> = Lazy::new(|| {
    build(&[
        ("Olá", "o-LA", "Hello"),
        ("Mundo", "MOON-do", "World"),
    ])
});
