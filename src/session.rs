/*!
 * Analysis session state.
 *
 * A session owns the draft input, the selected language and the current
 * analysis result for one user. Every request gets a monotonically
 * increasing sequence number; a result is only installed if its request
 * is still the latest one issued, so a slow earlier request can never
 * overwrite the result of a later one. Outcomes are broadcast as
 * [`AnalysisEvent`]s for whatever notification layer is listening.
 */

use log::{debug, info, warn};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::errors::{AnalysisError, SessionError};
use crate::language::LanguageTag;
use crate::pipeline::AnnotationPipeline;
use crate::segment::{AnalysisResult, SavePayload};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// A request issued by the session
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTicket {
    pub sequence: u64,
    pub text: String,
    pub language: LanguageTag,
}

/// Outcome notifications for the notification layer
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent {
    Succeeded {
        sequence: u64,
        language: LanguageTag,
        segment_count: usize,
    },
    Failed {
        sequence: u64,
        language: LanguageTag,
        reason: AnalysisError,
    },
}

/// What happened to one request
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The result is now the session's current result
    Completed(Arc<AnalysisResult>),
    /// The request failed; any previous result is still displayed
    Failed(AnalysisError),
    /// A newer request was issued while this one was in flight; the outcome was discarded
    Superseded { sequence: u64 },
}

#[derive(Debug, Default)]
struct SessionState {
    input: String,
    language: LanguageTag,
    current: Option<Arc<AnalysisResult>>,
    /// Input and language the current result was produced from
    analyzed_request: Option<(String, LanguageTag)>,
    /// Whether the current result still matches the draft input
    analyzed: bool,
    /// Last request that failed in a retryable way
    failed: Option<RequestTicket>,
}

/// Per-user analysis session
#[derive(Debug)]
pub struct AnalysisSession {
    state: RwLock<SessionState>,
    sequence: AtomicU64,
    events: broadcast::Sender<AnalysisEvent>,
}

impl AnalysisSession {
    /// Create a session with the language's example text as draft input
    pub fn new(language: LanguageTag) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(SessionState {
                input: language.example_text().to_string(),
                language,
                ..Default::default()
            }),
            sequence: AtomicU64::new(0),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AnalysisEvent> {
        self.events.subscribe()
    }

    pub fn input(&self) -> String {
        self.state.read().input.clone()
    }

    pub fn language(&self) -> LanguageTag {
        self.state.read().language
    }

    /// Current result, which may be stale if the input was edited since
    pub fn current(&self) -> Option<Arc<AnalysisResult>> {
        self.state.read().current.clone()
    }

    pub fn is_analyzed(&self) -> bool {
        self.state.read().analyzed
    }

    pub fn latest_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    pub fn pending_retry(&self) -> Option<RequestTicket> {
        self.state.read().failed.clone()
    }

    /// Replace the draft input; the current result stays but is no longer saveable
    pub fn set_input(&self, text: &str) {
        let mut state = self.state.write();
        state.input = text.to_string();
        state.analyzed = false;
    }

    /// Switch language, loading its example text and dropping the current result
    ///
    /// Requests still in flight for the old language are superseded.
    pub fn select_language(&self, language: LanguageTag) {
        self.sequence.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write();
        state.language = language;
        state.input = language.example_text().to_string();
        state.current = None;
        state.analyzed_request = None;
        state.analyzed = false;
        state.failed = None;
        debug!("Session switched to {}", language);
    }

    /// Issue a new request, superseding any request still in flight
    pub fn begin(&self, text: &str, language: LanguageTag) -> RequestTicket {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            sequence,
            text: text.to_string(),
            language,
        }
    }

    /// Install the outcome of a request if it is still the latest one
    pub fn accept(
        &self,
        ticket: &RequestTicket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> SessionOutcome {
        let mut state = self.state.write();

        let latest = self.sequence.load(Ordering::SeqCst);
        if ticket.sequence != latest {
            debug!(
                "Discarding outcome of request #{} (latest is #{})",
                ticket.sequence, latest
            );
            return SessionOutcome::Superseded {
                sequence: ticket.sequence,
            };
        }

        match outcome {
            Ok(result) => {
                let result = Arc::new(result);
                state.current = Some(Arc::clone(&result));
                state.analyzed_request = Some((ticket.text.clone(), ticket.language));
                state.analyzed = state.input == ticket.text && state.language == ticket.language;
                state.failed = None;
                drop(state);

                self.emit(AnalysisEvent::Succeeded {
                    sequence: ticket.sequence,
                    language: ticket.language,
                    segment_count: result.len(),
                });
                SessionOutcome::Completed(result)
            }
            Err(reason) => {
                if reason.is_retryable() {
                    state.failed = Some(ticket.clone());
                }
                drop(state);

                warn!("Analysis request #{} failed: {}", ticket.sequence, reason);
                self.emit(AnalysisEvent::Failed {
                    sequence: ticket.sequence,
                    language: ticket.language,
                    reason: reason.clone(),
                });
                SessionOutcome::Failed(reason)
            }
        }
    }

    /// Analyze the draft input in the selected language
    pub async fn analyze(&self, pipeline: &AnnotationPipeline) -> SessionOutcome {
        let (text, language) = {
            let state = self.state.read();
            (state.input.clone(), state.language)
        };
        self.run(pipeline, text, language).await
    }

    /// Set the draft to `text` in `language` and analyze it
    pub async fn analyze_text(
        &self,
        pipeline: &AnnotationPipeline,
        text: &str,
        language: LanguageTag,
    ) -> SessionOutcome {
        {
            let mut state = self.state.write();
            if state.input != text || state.language != language {
                state.analyzed = false;
            }
            state.input = text.to_string();
            state.language = language;
        }
        self.run(pipeline, text.to_string(), language).await
    }

    /// Re-issue the last failed request with its original input
    pub async fn retry(&self, pipeline: &AnnotationPipeline) -> Result<SessionOutcome, SessionError> {
        let failed = self
            .state
            .write()
            .failed
            .take()
            .ok_or(SessionError::NothingToRetry)?;
        info!("Retrying analysis of {} text", failed.language.display_name());
        Ok(self.analyze_text(pipeline, &failed.text, failed.language).await)
    }

    /// Payload for the library collaborator; requires an up-to-date analysis
    pub fn save_payload(&self) -> Result<SavePayload, SessionError> {
        let state = self.state.read();
        if !state.analyzed {
            return Err(SessionError::NotAnalyzed);
        }
        match (&state.current, &state.analyzed_request) {
            (Some(result), Some((text, language))) => {
                Ok(SavePayload::new(text, *language, result.as_ref().clone()))
            }
            _ => Err(SessionError::NotAnalyzed),
        }
    }

    async fn run(&self, pipeline: &AnnotationPipeline, text: String, language: LanguageTag) -> SessionOutcome {
        let ticket = self.begin(&text, language);
        debug!("Issued analysis request #{} for {}", ticket.sequence, language);
        let outcome = pipeline.run_analysis(&ticket.text, ticket.language).await;
        self.accept(&ticket, outcome)
    }

    fn emit(&self, event: AnalysisEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(LanguageTag::default())
    }
}
