//! AWS S3 client wrapper for bucket audit operations

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::Client as S3Client;
use log::debug;

use crate::aws::{AwsError, AwsResult, BucketApi};
use crate::types::{AclGrant, BucketSummary};

/// Error code S3 returns from GetBucketPolicy when no policy is attached.
const NO_SUCH_BUCKET_POLICY: &str = "NoSuchBucketPolicy";

pub struct AwsS3Client {
    client: S3Client,
}

impl AwsS3Client {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BucketApi for AwsS3Client {
    async fn list_buckets(&self) -> AwsResult<Vec<BucketSummary>> {
        let response = self.client.list_buckets().send().await.map_err(|e| {
            AwsError::S3Error(format!("Failed to list buckets: {}", DisplayErrorContext(&e)))
        })?;

        let buckets = response
            .buckets()
            .iter()
            .map(|bucket| BucketSummary {
                name: bucket.name().map(str::to_string),
            })
            .collect::<Vec<_>>();
        debug!("ListBuckets returned {} buckets", buckets.len());
        Ok(buckets)
    }

    async fn get_bucket_policy(&self, bucket: &str) -> AwsResult<Option<String>> {
        match self.client.get_bucket_policy().bucket(bucket).send().await {
            Ok(response) => Ok(response.policy().map(str::to_string)),
            Err(e) => {
                let code = e.as_service_error().and_then(ProvideErrorMetadata::code);
                if code == Some(NO_SUCH_BUCKET_POLICY) {
                    Err(AwsError::PolicyNotFound(bucket.to_string()))
                } else {
                    Err(AwsError::S3Error(format!(
                        "Failed to get bucket policy for '{bucket}': {}",
                        DisplayErrorContext(&e)
                    )))
                }
            }
        }
    }

    async fn get_bucket_policy_status(&self, bucket: &str) -> AwsResult<bool> {
        let response = self
            .client
            .get_bucket_policy_status()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                AwsError::S3Error(format!(
                    "Failed to get bucket policy status for '{bucket}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(response
            .policy_status()
            .and_then(|status| status.is_public())
            .unwrap_or(false))
    }

    async fn get_bucket_acl(&self, bucket: &str) -> AwsResult<Vec<AclGrant>> {
        let response = self
            .client
            .get_bucket_acl()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                AwsError::S3Error(format!(
                    "Failed to get bucket ACL for '{bucket}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(response
            .grants()
            .iter()
            .map(|grant| AclGrant {
                grantee_uri: grant
                    .grantee()
                    .and_then(|grantee| grantee.uri())
                    .map(str::to_string),
                permission: grant.permission().map(|p| p.as_str().to_string()),
            })
            .collect())
    }
}
