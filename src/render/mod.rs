/*!
 * Display contract for analyzed text.
 *
 * The renderer maps segments, in order, to display nodes. Interactive
 * segments expose a detail lookup keyed by segment id; the lookup is a
 * pure function of the segment and never touches the result.
 */

use serde::Serialize;
use std::collections::BTreeSet;

use crate::app_config::RenderConfig;
use crate::language::LanguageTag;
use crate::segment::{AnalysisResult, Segment, SegmentId};

pub mod presenter;

pub use presenter::{TranslationPresenter, TranslationView};

/// Text shown when there is nothing to render
pub const EMPTY_TEXT_MESSAGE: &str = "No text to display.";

/// One rendered unit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderNode {
    /// Unit with a detail lookup
    Interactive {
        id: SegmentId,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        ruby: Option<String>,
    },
    /// Unit shown verbatim
    Plain {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        ruby: Option<String>,
    },
    LineBreak,
}

/// Rendered segment sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedText {
    pub nodes: Vec<RenderNode>,
}

impl RenderedText {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Terminal rendering: ruby text in parentheses after its unit
    pub fn to_terminal(&self) -> String {
        if self.nodes.is_empty() {
            return EMPTY_TEXT_MESSAGE.to_string();
        }

        let mut out = String::new();
        for node in &self.nodes {
            match node {
                RenderNode::Interactive { text, ruby, .. } | RenderNode::Plain { text, ruby } => {
                    out.push_str(text);
                    if let Some(ruby) = ruby {
                        out.push('(');
                        out.push_str(ruby);
                        out.push(')');
                    }
                }
                RenderNode::LineBreak => out.push('\n'),
            }
        }
        out
    }

    /// The originals only, line breaks as newlines
    pub fn to_plain(&self) -> String {
        self.nodes
            .iter()
            .map(|node| match node {
                RenderNode::Interactive { text, .. } | RenderNode::Plain { text, .. } => text.as_str(),
                RenderNode::LineBreak => "\n",
            })
            .collect()
    }
}

/// Segment renderer
#[derive(Debug, Clone)]
pub struct SegmentRenderer {
    show_pronunciation: bool,
}

impl SegmentRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            show_pronunciation: config.show_pronunciation,
        }
    }

    pub fn render(&self, result: &AnalysisResult) -> RenderedText {
        let nodes = result
            .segments()
            .iter()
            .map(|segment| self.render_segment(segment))
            .collect();
        RenderedText { nodes }
    }

    fn render_segment(&self, segment: &Segment) -> RenderNode {
        if segment.is_line_break() {
            return RenderNode::LineBreak;
        }

        let ruby = if self.show_pronunciation && segment.language.uses_ruby() {
            segment.pronunciation.clone()
        } else {
            None
        };

        if segment.interactive && segment.definition.is_some() {
            RenderNode::Interactive {
                id: segment.id,
                text: segment.original.clone(),
                ruby,
            }
        } else {
            RenderNode::Plain {
                text: segment.original.clone(),
                ruby,
            }
        }
    }
}

impl Default for SegmentRenderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

/// Content of an opened detail popover
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailCard {
    pub id: SegmentId,
    pub term: String,
    pub pronunciation_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    pub definition: String,
    pub language: LanguageTag,
    pub font_family: &'static str,
    pub placeholder: bool,
}

impl DetailCard {
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n", self.term);
        if let Some(pronunciation) = &self.pronunciation {
            out.push_str(&format!("{}: {}\n", self.pronunciation_label, pronunciation));
        }
        out.push_str(&format!("Definition: {}", self.definition));
        if self.placeholder {
            out.push_str(" (placeholder)");
        }
        out
    }
}

/// Detail for an interactive segment, `None` for unknown or non-interactive ids
pub fn lookup_detail(result: &AnalysisResult, id: SegmentId) -> Option<DetailCard> {
    let segment = result.find(id)?;
    if !segment.interactive {
        return None;
    }
    let definition = segment.definition.clone()?;
    Some(DetailCard {
        id,
        term: segment.original.clone(),
        pronunciation_label: segment.language.pronunciation_label(),
        pronunciation: segment.pronunciation.clone(),
        definition,
        language: segment.language,
        font_family: segment.language.font_family(),
        placeholder: segment.placeholder,
    })
}

/// One line per interactive segment: id, term, pronunciation and definition
pub fn format_glossary(result: &AnalysisResult) -> String {
    result
        .interactive_segments()
        .filter_map(|segment| lookup_detail(result, segment.id))
        .map(|card| match &card.pronunciation {
            Some(pronunciation) => format!("{:>4}  {} [{}]: {}", card.id.0, card.term, pronunciation, card.definition),
            None => format!("{:>4}  {}: {}", card.id.0, card.term, card.definition),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Open/closed state of detail popovers, one flag per segment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopoverState {
    open: BTreeSet<SegmentId>,
}

impl PopoverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the popover for `id`, returning its card if the segment is interactive
    pub fn open(&mut self, result: &AnalysisResult, id: SegmentId) -> Option<DetailCard> {
        let card = lookup_detail(result, id)?;
        self.open.insert(id);
        Some(card)
    }

    pub fn close(&mut self, id: SegmentId) {
        self.open.remove(&id);
    }

    /// Flip the popover for `id`; returns whether it is open afterwards
    pub fn toggle(&mut self, result: &AnalysisResult, id: SegmentId) -> bool {
        if self.open.contains(&id) {
            self.close(id);
            false
        } else {
            self.open(result, id).is_some()
        }
    }

    pub fn is_open(&self, id: SegmentId) -> bool {
        self.open.contains(&id)
    }

    /// Cards of all open popovers, in segment order
    pub fn open_cards(&self, result: &AnalysisResult) -> Vec<DetailCard> {
        self.open
            .iter()
            .filter_map(|id| lookup_detail(result, *id))
            .collect()
    }

    /// Close everything, e.g. when a new result replaces the old one
    pub fn clear(&mut self) {
        self.open.clear();
    }
}
