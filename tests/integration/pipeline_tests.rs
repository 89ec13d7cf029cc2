/*!
 * End-to-end tests for the annotation pipeline
 */

use std::sync::Arc;
use std::time::Duration;

use annotext::analyzers::mock::MockAnalyzer;
use annotext::app_config::Config;
use annotext::errors::{AnalysisError, AnalyzerError};
use annotext::language::LanguageTag;
use annotext::pipeline::{self, AnnotationPipeline, PipelineConfig};
use annotext::registry::AnalyzerRegistry;
use annotext::segment::{Provenance, SegmentKind};

use crate::common;

#[tokio::test]
async fn test_runAnalysis_withChinesePoem_shouldUseCuratedTranslations() {
    let pipeline = common::default_pipeline();
    let text = LanguageTag::Chinese.example_text();

    let result = pipeline.run_analysis(text, LanguageTag::Chinese).await.unwrap();

    assert_eq!(result.len(), 25);
    assert!(result.provenance().is_curated());
    assert!(result.literal_translation().starts_with("Red bean grow south country."));
    assert!(result.idiomatic_translation().contains("tokens of longing"));
    assert!(result.notes().contains("Wang Wei"));
    assert_eq!(result.reconstruct(), text);

    let line_breaks: Vec<_> = result.segments().iter().filter(|s| s.is_line_break()).collect();
    assert_eq!(line_breaks.len(), 1);
    assert_eq!(line_breaks[0].id.0, 13);
}

#[tokio::test]
async fn test_runAnalysis_withPoemLineOnly_shouldKeepAnnotationsButUsePlaceholderTranslations() {
    let pipeline = common::default_pipeline();

    let result = pipeline.run_analysis(common::POEM_LINE, LanguageTag::Chinese).await.unwrap();

    assert_eq!(result.len(), 12);
    assert_eq!(result.provenance(), &Provenance::Lexicon { placeholder_segments: 0 });
    assert_eq!(result.literal_translation(), "Placeholder literal Chinese translation.");
}

#[tokio::test]
async fn test_runAnalysis_withPortugueseGreeting_shouldSegmentWords() {
    let pipeline = common::default_pipeline();

    let result = pipeline.run_analysis("Olá Mundo", LanguageTag::Portuguese).await.unwrap();

    let segments = result.segments();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].original, "Olá");
    assert_eq!(segments[0].definition.as_deref(), Some("Hello"));
    assert_eq!(segments[1].kind, SegmentKind::Whitespace);
    assert!(!segments[1].interactive);
    assert_eq!(segments[2].original, "Mundo");
    assert_eq!(segments[2].definition.as_deref(), Some("World"));
    assert_eq!(result.idiomatic_translation(), "Hello World");
}

#[tokio::test]
async fn test_runAnalysis_withTeluguGreeting_shouldAnnotateBothWords() {
    let pipeline = common::default_pipeline();

    let result = pipeline
        .run_analysis(LanguageTag::Telugu.example_text(), LanguageTag::Telugu)
        .await
        .unwrap();

    let words: Vec<_> = result.interactive_segments().collect();
    assert_eq!(words.len(), 2);
    assert_eq!(words[0].pronunciation.as_deref(), Some("na-mas-kaa-ram"));
    assert_eq!(words[1].definition.as_deref(), Some("World"));
}

#[tokio::test]
async fn test_runAnalysis_withWhitespaceOnly_shouldFailWithEmptyInput() {
    let pipeline = common::default_pipeline();

    for blank in ["", "   ", "\n\t  \r\n"] {
        let err = pipeline.run_analysis(blank, LanguageTag::Chinese).await.unwrap_err();
        assert_eq!(err, AnalysisError::EmptyInput);
    }
}

#[tokio::test]
async fn test_runAnalysis_withUnknownEnglishText_shouldProducePlaceholders() {
    let pipeline = common::default_pipeline();

    let result = pipeline
        .run_analysis("colourless green ideas", LanguageTag::Other)
        .await
        .unwrap();

    assert_eq!(result.provenance(), &Provenance::Lexicon { placeholder_segments: 3 });
    for segment in result.interactive_segments() {
        assert!(segment.placeholder);
        assert_eq!(segment.definition.as_deref(), Some("definition"));
        assert_eq!(segment.pronunciation, None);
    }
    assert_eq!(result.literal_translation(), "Placeholder literal translation.");
}

#[tokio::test]
async fn test_runAnalysis_twiceWithSameInput_shouldBeDeterministic() {
    let pipeline = common::default_pipeline();
    let text = "紅豆\n生南國！";

    let first = pipeline.run_analysis(text, LanguageTag::Chinese).await.unwrap();
    let second = pipeline.run_analysis(text, LanguageTag::Chinese).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_runAnalysisTagged_withIsoCode_shouldResolveLanguage() {
    let pipeline = common::default_pipeline();

    let result = pipeline.run_analysis_tagged("Olá Mundo", "pt").await.unwrap();
    assert!(result.provenance().is_curated());

    let err = pipeline.run_analysis_tagged("Olá Mundo", "tlh").await.unwrap_err();
    assert!(matches!(err, AnalysisError::UnsupportedLanguageTag(_)));
}

#[tokio::test]
async fn test_runAnalysis_withFailingMock_shouldWrapAnalyzerError() {
    let mock = MockAnalyzer::failing();
    let pipeline = common::pipeline_with_mock(LanguageTag::Hindi, mock.clone());

    let err = pipeline.run_analysis("नमस्ते", LanguageTag::Hindi).await.unwrap_err();

    match err {
        AnalysisError::AnalyzerFailure { language, reason } => {
            assert_eq!(language, LanguageTag::Hindi);
            assert!(matches!(reason, AnalyzerError::Backend(_)));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_runAnalysis_withSlowMockAndTimeout_shouldReportTimeout() {
    let pipeline = common::pipeline_with_mock_timeout(
        LanguageTag::Portuguese,
        MockAnalyzer::slow(500),
        Duration::from_millis(20),
    );

    let err = pipeline.run_analysis("Olá", LanguageTag::Portuguese).await.unwrap_err();

    assert_eq!(
        err,
        AnalysisError::AnalyzerFailure {
            language: LanguageTag::Portuguese,
            reason: AnalyzerError::Timeout(20),
        }
    );
}

#[tokio::test]
async fn test_runAnalysis_withUnregisteredLanguage_shouldFallBackToOtherAnalyzer() {
    let mock = MockAnalyzer::working();
    let pipeline = common::pipeline_with_mock(LanguageTag::Other, mock.clone());

    let result = pipeline.run_analysis("hola mundo", LanguageTag::Telugu).await.unwrap();

    assert_eq!(mock.request_count(), 1);
    assert_eq!(result.segments()[0].definition.as_deref(), Some("[MOCK] hola"));
}

#[tokio::test]
async fn test_fromConfig_withExtraLexicon_shouldAnnotateNewWords() {
    let dir = common::create_temp_dir().unwrap();
    let lexicon_path = common::create_test_file(
        dir.path(),
        "en.json",
        r#"{ "hello": { "pronunciation": "heh-LOH", "definition": "a greeting" } }"#,
    )
    .unwrap();

    let mut config = Config::default();
    config.analysis.lexicon_paths.insert(LanguageTag::Other, lexicon_path);
    let pipeline = AnnotationPipeline::from_config(&config).unwrap();

    let result = pipeline.run_analysis("Hello there", LanguageTag::Other).await.unwrap();

    let hello = &result.segments()[0];
    assert!(!hello.placeholder);
    assert_eq!(hello.definition.as_deref(), Some("a greeting"));
    assert!(result.segments()[2].placeholder);
}

#[tokio::test]
async fn test_normalize_withAlreadyNormalizedResult_shouldBeIdempotent() {
    let pipeline = common::default_pipeline();
    let result = pipeline
        .run_analysis("紅豆\\n生南國", LanguageTag::Chinese)
        .await
        .unwrap();

    assert!(result.segments().iter().all(|s| s.original != "\\n"));
    let again = pipeline::normalize(result.clone());
    assert_eq!(again, result);
}

#[tokio::test]
async fn test_runAnalysis_withInvalidMockAndLegacyConfigFlag_shouldStillRejectResult() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{ "analysis": { "validate_invariants": false, "timeout_ms": 1000 } }"#,
    )
    .unwrap();
    let config = Config::load_or_create(&path).unwrap();

    let mock = MockAnalyzer::invalid();
    let registry = AnalyzerRegistry::builder()
        .register(LanguageTag::Other, Arc::new(mock.clone()))
        .build();
    let pipeline = AnnotationPipeline::new(
        Arc::new(registry),
        PipelineConfig::from_analysis_config(&config.analysis),
    );

    let err = pipeline.run_analysis("anything", LanguageTag::Other).await.unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::AnalyzerFailure { reason: AnalyzerError::InvariantViolation(_), .. }
    ));
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_runAnalysis_withMalformedInputRejection_shouldReportAnalyzerFailure() {
    let mock = MockAnalyzer::malformed();
    let pipeline = common::pipeline_with_mock(LanguageTag::Telugu, mock.clone());

    let err = pipeline.run_analysis("నమస్కారం", LanguageTag::Telugu).await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(err.kind(), "analyzer_failure");
    match err {
        AnalysisError::AnalyzerFailure { language, reason } => {
            assert_eq!(language, LanguageTag::Telugu);
            assert!(matches!(reason, AnalyzerError::MalformedInput(_)));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(mock.request_count(), 1);
}
