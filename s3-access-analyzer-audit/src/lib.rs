//! This crate provides the core business logic for the S3 Access Analyzer:
//! - Bucket policy parsing and risk analysis
//! - Public exposure checks from policy status and ACL signals
//! - The audit service that lists buckets and collects per-bucket results
//! - Text and JSON report rendering
//!

mod aws;
pub mod commands;
mod config;
mod error;
mod exposure;
pub mod policy;
mod report;
mod retry;
mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for a small, focused public API
pub use aws::{AwsError, AwsResult, AwsS3Client, BucketApi};
pub use commands::AuditService;
pub use config::{AuditConfig, RetryPolicy, DEFAULT_REGION};
pub use error::{AccessAnalyzerError, AccessAnalyzerResult};
pub use exposure::{is_public, ALL_USERS_GROUP_URI};
pub use policy::{analyze, parse, BucketPolicy, PolicyDocument, PolicyError};
pub use report::{render_json, render_text};
pub use retry::retry_with_backoff;
pub use types::{AclGrant, BucketAudit, BucketSummary, Finding, Severity};
