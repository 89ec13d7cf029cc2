/*!
 * # annotext - interactive text annotation
 *
 * A Rust library that turns pasted text in one of several languages into
 * a structured breakdown for language learners.
 *
 * ## Features
 *
 * - Per-unit annotations (pronunciation, definition) with on-demand detail lookup
 * - Literal vs. idiomatic translation pair plus contextual notes
 * - Character segmentation (Chinese) and whitespace-preserving word
 *   segmentation (Hindi, Telugu, Portuguese, generic fallback)
 * - Pluggable lexicons loaded from JSON
 * - Sessions where the latest request always wins
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `segment`: Segment and result data model
 * - `language`: Language tags and per-language metadata
 * - `lexicon`: Pronunciation/definition lookup tables
 * - `analyzers`: Character and word analyzers, fixtures, mock analyzer
 * - `registry`: Language tag to analyzer resolution
 * - `pipeline`: Validate, resolve, analyze, normalize
 * - `session`: Per-user state, request sequencing and outcome events
 * - `render`: Segment rendering, detail popovers, translation presenter
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod analyzers;
pub mod app_config;
pub mod errors;
pub mod language;
pub mod lexicon;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod segment;
pub mod session;

// Re-export main types for easier usage
pub use analyzers::Analyzer;
pub use app_config::Config;
pub use errors::{AnalysisError, AnalyzerError, AppError, LexiconError, SessionError};
pub use language::LanguageTag;
pub use pipeline::AnnotationPipeline;
pub use registry::AnalyzerRegistry;
pub use segment::{AnalysisResult, SavePayload, Segment, SegmentId};
pub use session::{AnalysisEvent, AnalysisSession, SessionOutcome};
