//! Submission session state and observer hooks

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::logic::endpoint::OrchestrationOutcome;

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    Success,
    Error,
}

impl Settlement {
    fn from_outcome(outcome: &OrchestrationOutcome) -> Self {
        match outcome {
            OrchestrationOutcome::Success(_) => Settlement::Success,
            OrchestrationOutcome::Exhausted(_) => Settlement::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Submitting {
        submission_id: Uuid,
        started_at: DateTime<Utc>,
    },
    Settled {
        submission_id: Uuid,
        settlement: Settlement,
        settled_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("submission {0} is still in flight")]
    AlreadySubmitting(Uuid),

    #[error("submission {0} is not the one in flight")]
    StaleTicket(Uuid),
}

/// Proof that a submission is in flight. Consumed by `settle`, so each
/// submission produces exactly one terminal notification.
#[derive(Debug, PartialEq, Eq)]
pub struct SubmissionTicket {
    id: Uuid,
}

impl SubmissionTicket {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

// ============================================================================
// OBSERVER
// ============================================================================

/// Presentation hooks. Called after the state has changed, outside the lock.
pub trait SessionObserver: Send + Sync {
    fn on_submitting(&self, _submission_id: Uuid) {}

    fn on_settled(&self, _submission_id: Uuid, _outcome: &OrchestrationOutcome) {}
}

pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

// ============================================================================
// SESSION
// ============================================================================

/// Cloneable handle; all clones share one state
#[derive(Clone)]
pub struct SubmissionSession {
    state: Arc<RwLock<SessionState>>,
    observer: Arc<dyn SessionObserver>,
}

impl SubmissionSession {
    pub fn new() -> Self {
        Self::with_observer(Arc::new(NoopObserver))
    }

    pub fn with_observer(observer: Arc<dyn SessionObserver>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::Idle)),
            observer,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(*self.state.read(), SessionState::Submitting { .. })
    }

    /// Enter `Submitting`. Rejected while another submission is in flight.
    pub fn begin(&self) -> Result<SubmissionTicket, SessionError> {
        let id = {
            let mut state = self.state.write();
            if let SessionState::Submitting { submission_id, .. } = *state {
                log::warn!("Submission rejected: {} still in flight", submission_id);
                return Err(SessionError::AlreadySubmitting(submission_id));
            }

            let id = Uuid::new_v4();
            *state = SessionState::Submitting {
                submission_id: id,
                started_at: Utc::now(),
            };
            id
        };

        log::debug!("Submission {} started", id);
        self.observer.on_submitting(id);
        Ok(SubmissionTicket { id })
    }

    /// Enter `Settled` with the terminal outcome of the submission
    pub fn settle(
        &self,
        ticket: SubmissionTicket,
        outcome: &OrchestrationOutcome,
    ) -> Result<Settlement, SessionError> {
        let settlement = Settlement::from_outcome(outcome);
        {
            let mut state = self.state.write();
            match *state {
                SessionState::Submitting { submission_id, .. } if submission_id == ticket.id => {}
                _ => return Err(SessionError::StaleTicket(ticket.id)),
            }

            *state = SessionState::Settled {
                submission_id: ticket.id,
                settlement,
                settled_at: Utc::now(),
            };
        }

        log::debug!("Submission {} settled: {:?}", ticket.id, settlement);
        self.observer.on_settled(ticket.id, outcome);
        Ok(settlement)
    }
}

impl Default for SubmissionSession {
    fn default() -> Self {
        Self::new()
    }
}
