/*!
 * Property tests for the segment invariants
 */

use proptest::prelude::*;

use annotext::analyzers::mock::MockAnalyzer;
use annotext::errors::AnalysisError;
use annotext::language::LanguageTag;
use annotext::pipeline::{self, AnnotationPipeline};
use annotext::segment::AnalysisResult;

use crate::common;

fn analyze_blocking(
    pipeline: &AnnotationPipeline,
    text: &str,
    language: LanguageTag,
) -> Result<AnalysisResult, AnalysisError> {
    tokio_test::block_on(pipeline.run_analysis(text, language))
}

fn word_language() -> impl Strategy<Value = LanguageTag> {
    prop_oneof![
        Just(LanguageTag::Hindi),
        Just(LanguageTag::Telugu),
        Just(LanguageTag::Portuguese),
        Just(LanguageTag::Other),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_wordLanguages_shouldReconstructInputExactly(
        text in "[a-zA-Záé .,!?\t\n]{1,40}",
        language in word_language(),
    ) {
        prop_assume!(!text.trim().is_empty());
        let pipeline = common::default_pipeline();

        let result = analyze_blocking(&pipeline, &text, language).unwrap();

        prop_assert_eq!(result.reconstruct(), text);
    }

    #[test]
    fn prop_chinese_shouldReconstructInputExactly(text in "[紅豆生南國你好，。！ \n]{1,30}") {
        prop_assume!(!text.trim().is_empty());
        let pipeline = common::default_pipeline();

        let result = analyze_blocking(&pipeline, &text, LanguageTag::Chinese).unwrap();

        prop_assert_eq!(result.reconstruct(), text);
    }

    #[test]
    fn prop_interactiveSegments_shouldAlwaysHaveDefinitions(
        text in "[a-z紅豆你，。 \n]{1,30}",
        chinese in any::<bool>(),
    ) {
        prop_assume!(!text.trim().is_empty());
        let language = if chinese { LanguageTag::Chinese } else { LanguageTag::Portuguese };
        let pipeline = common::default_pipeline();

        let result = analyze_blocking(&pipeline, &text, language).unwrap();

        let mut previous = 0;
        for segment in result.segments() {
            prop_assert!(segment.id.0 > previous);
            previous = segment.id.0;
            if segment.interactive {
                prop_assert!(!segment.definition.as_deref().unwrap_or("").is_empty());
            }
            if segment.is_line_break() {
                prop_assert!(segment.pronunciation.is_none());
                prop_assert!(segment.definition.is_none());
            }
        }
    }

    #[test]
    fn prop_normalize_shouldBeIdempotent(text in "[a-z]{1,5}(\\\\n[a-z]{1,5}){0,3}") {
        let pipeline = common::default_pipeline();

        let result = analyze_blocking(&pipeline, &text, LanguageTag::Chinese).unwrap();

        prop_assert!(result.segments().iter().all(|s| s.original != "\\n"));
        prop_assert_eq!(pipeline::normalize(result.clone()), result);
    }

    #[test]
    fn prop_blankInput_shouldNeverReachAnalyzer(text in "[ \t\r\n]{0,12}") {
        let mock = MockAnalyzer::working();
        let pipeline = common::pipeline_with_mock(LanguageTag::Other, mock.clone());

        let err = analyze_blocking(&pipeline, &text, LanguageTag::Other).unwrap_err();

        prop_assert_eq!(err, AnalysisError::EmptyInput);
        prop_assert_eq!(mock.request_count(), 0);
    }
}
