//! AWS SDK integration: the S3 operations the audit needs, behind a trait so the
//! checkers can run against any implementation.

pub(crate) mod s3_client;

pub use s3_client::AwsS3Client;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{AclGrant, BucketSummary};

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("S3 client error: {0}")]
    S3Error(String),
    #[error("No bucket policy attached to '{0}'")]
    PolicyNotFound(String),
}

pub type AwsResult<T> = Result<T, AwsError>;

/// The subset of the S3 API consumed by an audit run.
///
/// Implementations must be shareable across concurrently running bucket audits.
#[async_trait]
pub trait BucketApi: Send + Sync {
    /// List every bucket owned by the account, in the order S3 returns them.
    async fn list_buckets(&self) -> AwsResult<Vec<BucketSummary>>;

    /// Fetch the raw bucket policy JSON.
    ///
    /// Returns [`AwsError::PolicyNotFound`] when the bucket has no policy attached,
    /// and `Ok(None)` when S3 answers without a policy body.
    async fn get_bucket_policy(&self, bucket: &str) -> AwsResult<Option<String>>;

    /// Fetch the policy status flag S3 computes for the bucket policy.
    async fn get_bucket_policy_status(&self, bucket: &str) -> AwsResult<bool>;

    /// Fetch the grants of the bucket ACL.
    async fn get_bucket_acl(&self, bucket: &str) -> AwsResult<Vec<AclGrant>>;
}
