use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::state::{MonitorEvent, RunState, StateMachine, progress_for};
use crate::api::{ApiError, GenerationRecord};

/// Distinguishes where a failed attempt came from.
///
/// Only a transport failure says nothing about the job itself, so only a
/// transport failure warrants retrying the whole attempt; a remote failure
/// means the backend gave up on this input.
#[derive(Debug, Error)]
pub enum FailureSource {
    /// The backend reported `status == failed` for the job.
    #[error("generation failed: {message}")]
    Remote { message: String },
    /// The create or poll call failed before a job status could be read.
    #[error("transport failure: {0}")]
    Transport(ApiError),
}

impl FailureSource {
    pub fn is_transport(&self) -> bool {
        matches!(self, FailureSource::Transport(_))
    }
}

/// The single terminal event of one monitor run.
#[derive(Debug)]
pub enum MonitorOutcome {
    /// The job finished; the record carries the audio/video URLs.
    Completed { record: GenerationRecord },
    /// The attempt failed, remotely or at the transport layer.
    Failed { source: FailureSource },
    /// Monitoring stopped at the deadline. The remote job may still
    /// complete; this is "check back later", not a failure.
    TimedOut,
    /// The user stopped watching before the job settled.
    Cancelled,
}

/// Mutable bookkeeping for one generation attempt.
///
/// Owned exclusively by the monitor driving it; observers only ever see
/// [`MonitorSnapshot`] copies.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub id: String,
    pub job_id: Option<u64>,
    pub state: RunState,
    pub progress: u8,
    pub last_error: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl Attempt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            job_id: None,
            state: RunState::Idle,
            progress: 0,
            last_error: None,
            started_at: Utc::now(),
        }
    }

    /// Run one event through the reducer and apply its effects.
    ///
    /// Returns the new state, or `None` when the event was stale and the
    /// attempt is left untouched.
    pub fn apply(&mut self, event: &MonitorEvent) -> Option<RunState> {
        let next = StateMachine::next(self.state, event)?;
        match event {
            MonitorEvent::CreateSucceeded { job_id } => self.job_id = Some(*job_id),
            MonitorEvent::PollReturned(status) => self.progress = progress_for(*status),
            _ => {}
        }
        self.state = next;
        Some(next)
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// A read-only copy of the attempt for observers.
    pub fn snapshot(&self, elapsed_ms: u64) -> MonitorSnapshot {
        MonitorSnapshot {
            attempt_id: self.id.clone(),
            state: self.state,
            job_id: self.job_id,
            progress: self.progress,
            elapsed_ms,
            last_error: self.last_error.clone(),
        }
    }
}

impl Default for Attempt {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of an attempt, published on the monitor's watch
/// channel after every transition.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorSnapshot {
    pub attempt_id: String,
    pub state: RunState,
    pub job_id: Option<u64>,
    pub progress: u8,
    pub elapsed_ms: u64,
    pub last_error: Option<String>,
}

/// Structured report produced when an attempt settles.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptReport {
    pub attempt_id: String,
    pub job_id: Option<u64>,
    pub state: RunState,
    pub progress: u8,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub last_error: Option<String>,
}

impl AttemptReport {
    /// Generate a report from a settled attempt.
    pub fn from_attempt(attempt: &Attempt) -> Self {
        let now = Utc::now();
        let duration = now - attempt.started_at;

        Self {
            attempt_id: attempt.id.clone(),
            job_id: attempt.job_id,
            state: attempt.state,
            progress: attempt.progress,
            started_at: attempt.started_at,
            finished_at: now,
            duration_ms: duration.num_milliseconds(),
            last_error: attempt.last_error.clone(),
        }
    }
}
