/*!
 * Annotation pipeline.
 *
 * Turns raw text plus a language tag into a validated [`AnalysisResult`]:
 * 1. reject blank input
 * 2. resolve the analyzer through the registry
 * 3. run it, with an optional timeout
 * 4. normalize escaped newline markers into real line breaks
 * 5. check the segment invariants
 *
 * The pipeline is the only place where analyzer errors become
 * [`AnalysisError`] values.
 */

use log::{debug, error, info};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::{AnalysisConfig, Config};
use crate::errors::{AnalysisError, AnalyzerError, LexiconError};
use crate::language::LanguageTag;
use crate::registry::AnalyzerRegistry;
use crate::segment::{AnalysisResult, Segment, NEWLINE_ESCAPE};

/// Configuration for the annotation pipeline.
///
/// Segment invariants are always checked; no setting skips that step.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Upper bound on one analyzer call
    pub timeout: Option<Duration>,
}

impl PipelineConfig {
    pub fn from_analysis_config(config: &AnalysisConfig) -> Self {
        Self {
            timeout: config.timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// The annotation pipeline orchestrator.
#[derive(Debug, Clone)]
pub struct AnnotationPipeline {
    registry: Arc<AnalyzerRegistry>,
    config: PipelineConfig,
}

impl AnnotationPipeline {
    pub fn new(registry: Arc<AnalyzerRegistry>, config: PipelineConfig) -> Self {
        Self { registry, config }
    }

    /// Pipeline over the process-wide default registry
    pub fn with_defaults() -> Self {
        Self::new(AnalyzerRegistry::global(), PipelineConfig::default())
    }

    /// Pipeline built from the application configuration
    pub fn from_config(config: &Config) -> Result<Self, LexiconError> {
        let registry = AnalyzerRegistry::from_config(config)?;
        Ok(Self::new(
            Arc::new(registry),
            PipelineConfig::from_analysis_config(&config.analysis),
        ))
    }

    pub fn registry(&self) -> &AnalyzerRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyze `raw_text` as `language`
    pub async fn run_analysis(
        &self,
        raw_text: &str,
        language: LanguageTag,
    ) -> Result<AnalysisResult, AnalysisError> {
        if raw_text.trim().is_empty() {
            debug!("Rejecting blank input before analyzer resolution");
            return Err(AnalysisError::EmptyInput);
        }

        let analyzer = self.registry.resolve(language);
        let start_time = Instant::now();
        debug!(
            "Analyzing {} chars as {} with '{}' analyzer",
            raw_text.chars().count(),
            language,
            analyzer.name()
        );

        let outcome = match self.config.timeout {
            Some(limit) => match tokio::time::timeout(limit, analyzer.analyze(raw_text)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(AnalyzerError::Timeout(limit.as_millis() as u64)),
            },
            None => analyzer.analyze(raw_text).await,
        };

        let result = outcome.map_err(|reason| {
            error!("Analyzer '{}' failed for {}: {}", analyzer.name(), language, reason);
            AnalysisError::AnalyzerFailure { language, reason }
        })?;

        let result = normalize(result);

        result.check().map_err(|reason| {
            error!("Analyzer '{}' returned an inconsistent result: {}", analyzer.name(), reason);
            AnalysisError::AnalyzerFailure { language, reason }
        })?;

        info!(
            "Text analysis complete for {}: {} segments in {:.2?}",
            language.display_name(),
            result.len(),
            start_time.elapsed()
        );
        Ok(result)
    }

    /// Analyze with a raw tag, failing loudly on tags outside the supported set
    pub async fn run_analysis_tagged(
        &self,
        raw_text: &str,
        tag: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let language: LanguageTag = tag.parse()?;
        self.run_analysis(raw_text, language).await
    }
}

impl Default for AnnotationPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Rewrite escaped newline markers into real line-break segments
pub fn normalize(result: AnalysisResult) -> AnalysisResult {
    if !result.segments().iter().any(|s| s.original == NEWLINE_ESCAPE) {
        return result;
    }

    let (segments, literal, idiomatic, notes, provenance) = result.into_parts();
    let segments = segments
        .into_iter()
        .map(|segment| {
            if segment.original == NEWLINE_ESCAPE {
                Segment::line_break(segment.id.0, "\n", segment.language)
            } else {
                segment
            }
        })
        .collect();
    AnalysisResult::new(segments, literal, idiomatic, notes, provenance)
}
