//! Analysis use case.
//!
//! Sequences one analysis call at a time, remembers the latest result and
//! saves it to the local history on request.

use std::sync::{Arc, Mutex};

use resumate_core::analysis::{AnalysisRequest, AnalysisResult};
use resumate_core::api::ApiTransport;
use resumate_core::error::{ResumateError, Result};
use resumate_core::history::{HistoryEntry, HistoryRepository};
use resumate_core::session::SessionRepository;

use crate::single_flight::SingleFlight;

pub const NOTHING_TO_SAVE: &str = "No analysis to save";

pub struct AnalysisService {
    transport: Arc<dyn ApiTransport>,
    sessions: Arc<dyn SessionRepository>,
    history: Arc<dyn HistoryRepository>,
    flight: SingleFlight,
    last_result: Mutex<Option<AnalysisResult>>,
}

impl AnalysisService {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        sessions: Arc<dyn SessionRepository>,
        history: Arc<dyn HistoryRepository>,
    ) -> Self {
        Self {
            transport,
            sessions,
            history,
            flight: SingleFlight::new("Analysis"),
            last_result: Mutex::new(None),
        }
    }

    /// Submits a validated request with the stored access token attached.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let _guard = self.flight.begin()?;

        let session = self.sessions.load();
        let api_request = request.to_api_request();
        tracing::debug!("Submitting {:?}-mode analysis", request.mode());

        let reply = self.transport.execute(&api_request, session.bearer()).await?;
        if !reply.is_success() {
            return Err(reply.into_error());
        }

        let result: AnalysisResult = reply.json()?;
        tracing::info!(
            "Analysis complete: {:.1}% match, {} matched, {} missing",
            result.match_percentage,
            result.matched_skills.len(),
            result.missing_skills.len()
        );

        self.remember(result.clone());
        Ok(result)
    }

    pub fn last_result(&self) -> Option<AnalysisResult> {
        self.last_result.lock().ok().and_then(|last| last.clone())
    }

    /// Appends the latest result to the history.
    pub fn save_last(&self) -> Result<HistoryEntry> {
        let result = self
            .last_result()
            .ok_or_else(|| ResumateError::validation(NOTHING_TO_SAVE))?;
        self.history.append(&result)
    }

    /// Saved entries, most recent first.
    pub fn history(&self) -> Result<Vec<HistoryEntry>> {
        self.history.list()
    }

    /// Looks up a saved entry and makes it the latest result.
    pub fn open_saved(&self, id: i64) -> Result<Option<HistoryEntry>> {
        let entry = self.history.find_by_id(id)?;
        if let Some(entry) = &entry {
            self.remember(entry.result.clone());
        }
        Ok(entry)
    }

    fn remember(&self, result: AnalysisResult) {
        if let Ok(mut last) = self.last_result.lock() {
            *last = Some(result);
        }
    }
}
