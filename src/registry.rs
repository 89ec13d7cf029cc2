/*!
 * Analyzer registry.
 *
 * Maps every language tag to its analyzer. The registry is populated once
 * at startup and is read-only afterwards; resolution is a pure lookup.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

use crate::analyzers::{analyzer_for, Analyzer};
use crate::app_config::Config;
use crate::errors::{AnalysisError, LexiconError};
use crate::language::LanguageTag;
use crate::lexicon::Lexicon;

static GLOBAL: Lazy<Arc<AnalyzerRegistry>> = Lazy::new(|| Arc::new(AnalyzerRegistry::with_defaults()));

/// Language tag to analyzer association
#[derive(Debug, Clone)]
pub struct AnalyzerRegistry {
    analyzers: HashMap<LanguageTag, Arc<dyn Analyzer>>,
}

impl AnalyzerRegistry {
    /// Process-wide registry built from default settings
    pub fn global() -> Arc<AnalyzerRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Registry with built-in lexicons and default placeholders
    pub fn with_defaults() -> Self {
        let placeholder = crate::app_config::PlaceholderConfig::default();
        let mut builder = Self::builder();
        for language in LanguageTag::ALL {
            builder = builder.register(language, analyzer_for(language, Lexicon::builtin(language), &placeholder));
        }
        builder.build()
    }

    /// Registry honoring configured placeholders and extra lexicon files
    pub fn from_config(config: &Config) -> Result<Self, LexiconError> {
        let mut builder = Self::builder();
        for language in LanguageTag::ALL {
            let mut lexicon = Lexicon::builtin(language);
            if let Some(path) = config.analysis.lexicon_paths.get(&language) {
                lexicon = lexicon.merged(Lexicon::from_json_file(path)?);
            }
            builder = builder.register(language, analyzer_for(language, lexicon, &config.placeholder));
        }
        Ok(builder.build())
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            analyzers: HashMap::new(),
        }
    }

    /// Analyzer for a tag; a tag without a registration gets the `other` analyzer
    pub fn resolve(&self, language: LanguageTag) -> Arc<dyn Analyzer> {
        if let Some(analyzer) = self.analyzers.get(&language) {
            return Arc::clone(analyzer);
        }

        warn!("No analyzer registered for {}, falling back to 'other'", language);
        match self.analyzers.get(&LanguageTag::Other) {
            Some(analyzer) => Arc::clone(analyzer),
            None => analyzer_for(
                LanguageTag::Other,
                Lexicon::new(),
                &crate::app_config::PlaceholderConfig::default(),
            ),
        }
    }

    /// Resolve a raw tag, treating unknown or missing tags as `other`
    pub fn resolve_lenient(&self, tag: &str) -> Arc<dyn Analyzer> {
        self.resolve(LanguageTag::parse_lenient(tag))
    }

    /// Resolve a raw tag, failing on anything outside the supported set
    pub fn resolve_strict(&self, tag: &str) -> Result<Arc<dyn Analyzer>, AnalysisError> {
        let language: LanguageTag = tag.parse()?;
        Ok(self.resolve(language))
    }

    pub fn languages(&self) -> Vec<LanguageTag> {
        let mut languages: Vec<LanguageTag> = self.analyzers.keys().copied().collect();
        languages.sort();
        languages
    }
}

/// Startup-time builder; the built registry cannot be changed
pub struct RegistryBuilder {
    analyzers: HashMap<LanguageTag, Arc<dyn Analyzer>>,
}

impl RegistryBuilder {
    pub fn register(mut self, language: LanguageTag, analyzer: Arc<dyn Analyzer>) -> Self {
        debug!("Registering '{}' analyzer for {}", analyzer.name(), language);
        self.analyzers.insert(language, analyzer);
        self
    }

    pub fn build(self) -> AnalyzerRegistry {
        AnalyzerRegistry {
            analyzers: self.analyzers,
        }
    }
}
