//! Error types for audit runs.
//!
//! Only failures that abort a whole run live here. Per-bucket problems are
//! turned into findings or degraded signals and never reach the caller.

use thiserror::Error;

use crate::aws::AwsError;

#[derive(Error, Debug)]
pub enum AccessAnalyzerError {
    /// Buckets could not be listed within the retry budget.
    #[error("Failed to list S3 buckets after {attempts} attempt(s)")]
    Listing {
        attempts: u32,
        #[source]
        source: AwsError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AccessAnalyzerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type AccessAnalyzerResult<T> = Result<T, AccessAnalyzerError>;
