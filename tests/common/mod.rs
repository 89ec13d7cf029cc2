/*!
 * Common test utilities for the annotext test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use annotext::analyzers::mock::MockAnalyzer;
use annotext::language::LanguageTag;
use annotext::pipeline::{AnnotationPipeline, PipelineConfig};
use annotext::registry::AnalyzerRegistry;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Route library log output through the test harness; safe to call repeatedly
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Pipeline over the built-in analyzers with no timeout
pub fn default_pipeline() -> AnnotationPipeline {
    init_test_logging();
    AnnotationPipeline::with_defaults()
}

/// Pipeline whose analyzer for `language` is replaced by `mock`
pub fn pipeline_with_mock(language: LanguageTag, mock: MockAnalyzer) -> AnnotationPipeline {
    let registry = AnalyzerRegistry::builder()
        .register(language, Arc::new(mock.for_language(language)))
        .build();
    AnnotationPipeline::new(Arc::new(registry), PipelineConfig::default())
}

/// Same as [`pipeline_with_mock`] with a timeout applied to every call
pub fn pipeline_with_mock_timeout(
    language: LanguageTag,
    mock: MockAnalyzer,
    timeout: Duration,
) -> AnnotationPipeline {
    let registry = AnalyzerRegistry::builder()
        .register(language, Arc::new(mock.for_language(language)))
        .build();
    AnnotationPipeline::new(Arc::new(registry), PipelineConfig::default().with_timeout(timeout))
}

/// The first line of the red-beans poem
pub const POEM_LINE: &str = "紅豆生南國，春來發幾枝。";
