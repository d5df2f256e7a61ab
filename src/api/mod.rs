//! API Module - Command Surface
//!
//! - `commands` - submission entry points and context
//! - `report` - text presentation of a submission

pub mod commands;
pub mod report;

pub use commands::{list_endpoints, list_presets, ClassifierContext, SubmissionReport, SubmitError};
