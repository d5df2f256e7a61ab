//! Session Module - Submission State Machine
//!
//! `Idle → Submitting → Settled(Success|Error)`, back to `Idle` only when a
//! new submission begins. The session owns the in-flight guard; callers pass
//! it explicitly instead of sharing page-level state.

pub mod state;

pub use state::{
    NoopObserver, SessionError, SessionObserver, SessionState, Settlement, SubmissionSession,
    SubmissionTicket,
};
