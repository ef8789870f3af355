//! Bucket policy model and risk analysis (pure Rust, no I/O)

pub mod analyzer;
pub mod document;

pub use analyzer::analyze;
pub use document::{parse, BucketPolicy, Effect, PolicyDocument, PolicyError, PolicyValue, Statement};
