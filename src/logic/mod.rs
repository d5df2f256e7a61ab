//! Logic Module - Request Orchestration & Response Normalization
//!
//! - `features/` - raw input → request vector
//! - `normalize/` - raw reply → `PredictionResult`
//! - `explain/` - explanation payload validation
//! - `endpoint/` - transport and sequential fallback
//! - `session/` - submission state machine
//! - `config` - layered client configuration

pub mod config;
pub mod endpoint;
pub mod explain;
pub mod features;
pub mod normalize;
pub mod session;
