/*!
 * Tests for segment rendering, detail lookup and translation presentation
 */

use annotext::app_config::RenderConfig;
use annotext::language::LanguageTag;
use annotext::render::presenter::{TranslationPresenter, NO_NOTES_MESSAGE};
use annotext::render::{format_glossary, lookup_detail, PopoverState, RenderNode, SegmentRenderer};
use annotext::segment::SegmentId;

use crate::common;

#[tokio::test]
async fn test_render_withChinesePoem_shouldAttachRubyAndLineBreak() {
    let pipeline = common::default_pipeline();
    let result = pipeline
        .run_analysis(LanguageTag::Chinese.example_text(), LanguageTag::Chinese)
        .await
        .unwrap();

    let rendered = SegmentRenderer::default().render(&result);

    assert_eq!(rendered.nodes.len(), 25);
    assert_eq!(
        rendered.nodes[0],
        RenderNode::Interactive {
            id: SegmentId(1),
            text: "紅".to_string(),
            ruby: Some("hóng".to_string()),
        }
    );
    assert_eq!(
        rendered.nodes[5],
        RenderNode::Plain {
            text: "，".to_string(),
            ruby: None,
        }
    );
    assert_eq!(rendered.nodes[12], RenderNode::LineBreak);
    assert_eq!(rendered.to_plain(), LanguageTag::Chinese.example_text());
    assert!(rendered.to_terminal().starts_with("紅(hóng)豆(dòu)生(shēng)"));
}

#[tokio::test]
async fn test_render_withPronunciationHidden_shouldOmitRuby() {
    let pipeline = common::default_pipeline();
    let result = pipeline.run_analysis(common::POEM_LINE, LanguageTag::Chinese).await.unwrap();
    let config = RenderConfig {
        show_pronunciation: false,
        ..RenderConfig::default()
    };

    let rendered = SegmentRenderer::new(&config).render(&result);

    assert_eq!(rendered.to_terminal(), common::POEM_LINE);
}

#[tokio::test]
async fn test_render_withWordLanguage_shouldNotUseRuby() {
    let pipeline = common::default_pipeline();
    let result = pipeline.run_analysis("Olá Mundo", LanguageTag::Portuguese).await.unwrap();

    let rendered = SegmentRenderer::default().render(&result);

    assert_eq!(rendered.to_terminal(), "Olá Mundo");
    assert!(matches!(rendered.nodes[1], RenderNode::Plain { .. }));
}

#[tokio::test]
async fn test_lookupDetail_withInteractiveAndPlainIds_shouldOnlyOpenInteractive() {
    let pipeline = common::default_pipeline();
    let result = pipeline
        .run_analysis(LanguageTag::Hindi.example_text(), LanguageTag::Hindi)
        .await
        .unwrap();

    let card = lookup_detail(&result, SegmentId(1)).unwrap();
    assert_eq!(card.term, "नमस्ते");
    assert_eq!(card.pronunciation_label, "pronunciation");
    assert_eq!(card.pronunciation.as_deref(), Some("na-mas-te"));
    assert!(card.font_family.contains("Devanagari"));
    assert!(card.to_text().contains("Definition: Hello / Greetings"));

    // Whitespace between the words and ids past the end have no detail
    assert!(lookup_detail(&result, SegmentId(2)).is_none());
    assert!(lookup_detail(&result, SegmentId(99)).is_none());
}

#[tokio::test]
async fn test_popoverState_shouldTrackEachSegmentIndependently() {
    let pipeline = common::default_pipeline();
    let result = pipeline.run_analysis(common::POEM_LINE, LanguageTag::Chinese).await.unwrap();
    let mut popovers = PopoverState::new();

    assert!(popovers.toggle(&result, SegmentId(1)));
    assert!(popovers.open(&result, SegmentId(3)).is_some());
    assert!(popovers.open(&result, SegmentId(6)).is_none());

    let terms: Vec<String> = popovers.open_cards(&result).into_iter().map(|c| c.term).collect();
    assert_eq!(terms, vec!["紅", "生"]);

    assert!(!popovers.toggle(&result, SegmentId(1)));
    assert!(!popovers.is_open(SegmentId(1)));
    assert!(popovers.is_open(SegmentId(3)));

    popovers.clear();
    assert!(popovers.open_cards(&result).is_empty());
}

#[tokio::test]
async fn test_formatGlossary_shouldListInteractiveSegmentsOnly() {
    let pipeline = common::default_pipeline();
    let result = pipeline.run_analysis("Olá Mundo", LanguageTag::Portuguese).await.unwrap();

    let glossary = format_glossary(&result);

    let lines: Vec<&str> = glossary.lines().collect();
    assert_eq!(lines, vec!["   1  Olá [o-LA]: Hello", "   3  Mundo [MOON-do]: World"]);
}

#[tokio::test]
async fn test_present_withCuratedAndPlaceholderResults_shouldLabelSections() {
    let pipeline = common::default_pipeline();
    let presenter = TranslationPresenter::default();

    let curated = pipeline.run_analysis("Olá Mundo", LanguageTag::Portuguese).await.unwrap();
    let view = presenter.present(&curated, LanguageTag::Portuguese);
    assert_eq!(view.literal_heading, "Portuguese (Literal) Translation");
    assert_eq!(view.idiomatic_heading, "English (Idiomatic) Translation");
    assert_eq!(view.notes, "A common Portuguese greeting.");

    let text = view.to_text();
    assert!(text.contains("== Contextual Notes =="));
    assert_ne!(view.notes, NO_NOTES_MESSAGE);
}
