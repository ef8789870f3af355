//! Audit configuration, passed explicitly to the service at construction.

use std::time::Duration;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Linear backoff for the bucket listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Attempt `i` (1-based) waits `i * base_delay` after failing.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    pub region: String,
    pub retry: RetryPolicy,
    /// Maximum number of buckets audited at once. `1` audits sequentially.
    pub concurrency: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            retry: RetryPolicy::default(),
            concurrency: 1,
        }
    }
}
