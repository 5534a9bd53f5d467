pub mod config;
pub mod error;
pub mod types;

pub use config::{AdvisorConfig, PhaseTable, ScoringTuning};
pub use error::{AdvisorError, Result};
