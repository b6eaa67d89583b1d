//! Pictogram selection session
//!
//! Sits between the query box and the outgoing message. Keystrokes are
//! debounced into best-search requests, results are published as
//! [`SessionEvent`]s, and the user's picks are kept in a bounded
//! [`SelectionSet`] until they are sent to the chat store.
//!
//! Every input bumps a generation counter and cancels the token of the
//! previous search, so a superseded request is dropped mid-flight and a
//! response that still races through is discarded instead of replacing
//! newer results.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::chat::ChatStore;
use super::pictogram_client::PictogramClient;
use super::selection::{SelectionSet, Toggle};
use crate::config::Config;
use crate::errors::{AppResult, SelectionError, SelectionResult};
use crate::models::{ChatMessage, PictogramId, PictogramRecord, SessionPhase};
use crate::utils::Clock;

/// Notifications for whatever renders the selector
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Local autocompletion for the current input (empty hides the list)
    Suggestions(Vec<String>),
    SearchStarted {
        generation: u64,
        query: String,
    },
    ResultsReady {
        generation: u64,
        query: String,
        results: Vec<PictogramRecord>,
    },
    ResultsCleared,
    /// Selected ids in pick order
    SelectionChanged(Vec<PictogramId>),
    MessageSent {
        friend: String,
        message: ChatMessage,
    },
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub debounce: Duration,
    pub min_query_length: usize,
    pub capacity: usize,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: config.search.debounce,
            min_query_length: config.search.min_query_length,
            capacity: config.selection.capacity,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug)]
struct SessionState {
    phase: SessionPhase,
    generation: u64,
    pending: Option<CancellationToken>,
    query: Option<String>,
    current_results: Vec<PictogramRecord>,
    selection: SelectionSet,
}

impl SessionState {
    /// Cancel whatever search is pending or in flight and start a new generation
    fn supersede(&mut self) -> u64 {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
        self.generation += 1;
        self.generation
    }

    fn clear_results(&mut self) {
        self.query = None;
        self.current_results.clear();
    }
}

struct SessionInner {
    client: Arc<PictogramClient>,
    chat: Arc<dyn ChatStore>,
    clock: Arc<dyn Clock>,
    settings: SessionSettings,
    events: mpsc::UnboundedSender<SessionEvent>,
    state: Mutex<SessionState>,
}

/// Cheap to clone; clones share the same session
#[derive(Clone)]
pub struct SelectionSession {
    inner: Arc<SessionInner>,
}

impl SelectionSession {
    pub fn new(
        client: Arc<PictogramClient>,
        chat: Arc<dyn ChatStore>,
        clock: Arc<dyn Clock>,
        settings: SessionSettings,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let state = SessionState {
            phase: SessionPhase::Idle,
            generation: 0,
            pending: None,
            query: None,
            current_results: Vec::new(),
            selection: SelectionSet::with_capacity(settings.capacity),
        };

        let session = Self {
            inner: Arc::new(SessionInner {
                client,
                chat,
                clock,
                settings,
                events,
                state: Mutex::new(state),
            }),
        };
        (session, receiver)
    }

    pub async fn phase(&self) -> SessionPhase {
        self.inner.state.lock().await.phase
    }

    /// Query whose results are currently shown
    pub async fn query(&self) -> Option<String> {
        self.inner.state.lock().await.query.clone()
    }

    pub async fn current_results(&self) -> Vec<PictogramRecord> {
        self.inner.state.lock().await.current_results.clone()
    }

    pub async fn selection(&self) -> Vec<PictogramRecord> {
        self.inner.state.lock().await.selection.items().to_vec()
    }

    /// Handle a keystroke in the query box
    pub async fn on_query_input(&self, text: &str) {
        let query = text.trim().to_string();
        let searchable = query.chars().count() >= self.inner.settings.min_query_length;

        let (generation, token) = {
            let mut state = self.inner.state.lock().await;
            let generation = state.supersede();
            if !searchable {
                state.clear_results();
                state.phase = SessionPhase::Idle;
                drop(state);
                self.inner.emit_cleared();
                return;
            }
            let token = CancellationToken::new();
            state.pending = Some(token.clone());
            (generation, token)
        };

        let suggestions = self.inner.client.suggestions(&query).await;
        self.inner.emit(SessionEvent::Suggestions(suggestions));

        let inner = self.inner.clone();
        let debounce = self.inner.settings.debounce;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Debounced search for '{}' superseded", query);
                }
                _ = tokio::time::sleep(debounce) => {
                    inner.run_search(generation, query, token).await;
                }
            }
        });
    }

    /// Search right away (enter key, search button, picked suggestion)
    ///
    /// Queries shorter than the minimum length only clear the shown results.
    pub async fn search_now(&self, text: &str) {
        let query = text.trim().to_string();
        let searchable = query.chars().count() >= self.inner.settings.min_query_length;

        let (generation, token) = {
            let mut state = self.inner.state.lock().await;
            let generation = state.supersede();
            if !searchable {
                state.clear_results();
                state.phase = SessionPhase::Idle;
                drop(state);
                self.inner.emit_cleared();
                return;
            }
            let token = CancellationToken::new();
            state.pending = Some(token.clone());
            (generation, token)
        };
        self.inner.emit(SessionEvent::Suggestions(Vec::new()));
        self.inner.run_search(generation, query, token).await;
    }

    /// Select a pictogram from the current results, or unselect it
    pub async fn toggle_selection(&self, id: PictogramId) -> SelectionResult<Toggle> {
        let mut state = self.inner.state.lock().await;

        let toggle = if state.selection.remove(id) {
            Toggle::Removed
        } else {
            let record = state
                .current_results
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or(SelectionError::NotInResults { id })
                .inspect_err(|e| warn!("{}", e))?;
            state
                .selection
                .add(record)
                .inspect_err(|e| warn!("Rejected pictogram {}: {}", id, e))?;
            Toggle::Added
        };

        if matches!(
            state.phase,
            SessionPhase::ResultsShown | SessionPhase::Selecting
        ) {
            state.phase = SessionPhase::Selecting;
        }
        let ids = state.selection.ids();
        drop(state);

        self.inner.emit(SessionEvent::SelectionChanged(ids));
        Ok(toggle)
    }

    /// Unselect if selected; returns whether anything changed
    pub async fn remove_selection(&self, id: PictogramId) -> bool {
        let mut state = self.inner.state.lock().await;
        if !state.selection.remove(id) {
            return false;
        }
        let ids = state.selection.ids();
        drop(state);

        self.inner.emit(SessionEvent::SelectionChanged(ids));
        true
    }

    /// Send the selection to `friend` as one pictogram message
    ///
    /// The session lock is released while the chat store runs, so its
    /// observers may query the session.
    pub async fn send(&self, friend: &str) -> AppResult<ChatMessage> {
        let (message, sent_ids) = {
            let mut state = self.inner.state.lock().await;
            if state.selection.is_empty() {
                state.phase = SessionPhase::Idle;
                warn!("{}", SelectionError::EmptySelection);
                return Err(SelectionError::EmptySelection.into());
            }
            state.phase = SessionPhase::Sending;

            let records = state.selection.items();
            let content = records
                .iter()
                .map(PictogramRecord::primary_keyword)
                .collect::<Vec<_>>()
                .join(" ");
            let image_urls = records.iter().map(|p| p.image_url.clone()).collect();
            let message =
                ChatMessage::sent_pictograms(content, self.inner.clock.time_label(), image_urls);
            (message, state.selection.ids())
        };

        let handoff = self.inner.chat.append_message(friend, message.clone()).await;

        let mut state = self.inner.state.lock().await;
        state.phase = SessionPhase::Idle;
        if let Err(e) = handoff {
            warn!("Failed to hand pictogram message to chat store: {}", e);
            return Err(e);
        }

        let count = sent_ids.len();
        state.selection.retain(|p| !sent_ids.contains(&p.id));
        state.supersede();
        state.clear_results();
        let ids = state.selection.ids();
        drop(state);

        info!("Sent {} pictograms to {}", count, friend);
        self.inner.emit(SessionEvent::SelectionChanged(ids));
        self.inner.emit(SessionEvent::ResultsCleared);
        self.inner.emit(SessionEvent::MessageSent {
            friend: friend.to_string(),
            message: message.clone(),
        });
        Ok(message)
    }

    /// Close the selector: drop pending searches, results and selection
    pub async fn close(&self) {
        let mut state = self.inner.state.lock().await;
        state.supersede();
        state.clear_results();
        state.selection.clear();
        state.phase = SessionPhase::Idle;
        drop(state);

        self.inner.emit(SessionEvent::Suggestions(Vec::new()));
        self.inner.emit(SessionEvent::ResultsCleared);
        self.inner.emit(SessionEvent::SelectionChanged(Vec::new()));
    }
}

impl SessionInner {
    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("Session event receiver dropped");
        }
    }

    fn emit_cleared(&self) {
        self.emit(SessionEvent::Suggestions(Vec::new()));
        self.emit(SessionEvent::ResultsCleared);
    }

    async fn run_search(&self, generation: u64, query: String, token: CancellationToken) {
        {
            let mut state = self.state.lock().await;
            if state.generation != generation || token.is_cancelled() {
                return;
            }
            state.phase = SessionPhase::Searching;
        }
        self.emit(SessionEvent::SearchStarted {
            generation,
            query: query.clone(),
        });

        let results = tokio::select! {
            _ = token.cancelled() => {
                debug!("Search for '{}' cancelled in flight", query);
                return;
            }
            results = self.client.best_search(&query) => results,
        };

        self.commit_results(generation, query, results).await;
    }

    async fn commit_results(&self, generation: u64, query: String, results: Vec<PictogramRecord>) {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(
                "Discarding results for '{}' from generation {} (current {})",
                query, generation, state.generation
            );
            return;
        }

        let dropped = state
            .selection
            .retain(|selected| results.iter().any(|r| r.id == selected.id));
        state.pending = None;
        state.query = Some(query.clone());
        state.current_results = results.clone();
        state.phase = SessionPhase::ResultsShown;
        let ids = state.selection.ids();
        drop(state);

        debug!("Showing {} results for '{}'", results.len(), query);
        self.emit(SessionEvent::ResultsReady {
            generation,
            query,
            results,
        });
        if dropped > 0 {
            self.emit(SessionEvent::SelectionChanged(ids));
        }
    }
}
