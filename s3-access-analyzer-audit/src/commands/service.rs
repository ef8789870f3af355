//! S3 Access Analyzer Service Layer
//!
//! The service holds the S3 client and the audit configuration, and exposes the
//! audit run used by the CLI. Configuration is passed in explicitly; nothing is
//! read from global state beyond the AWS credential provider chain.

use crate::aws::{AwsS3Client, BucketApi};
use crate::config::AuditConfig;
use crate::error::{AccessAnalyzerError, AccessAnalyzerResult};
use aws_sdk_s3::Client as S3Client;
use log::debug;

/// Main service struct that holds the S3 API and the audit configuration
pub struct AuditService<A = AwsS3Client> {
    pub(crate) api: A,
    pub(crate) config: AuditConfig,
}

impl AuditService<AwsS3Client> {
    /// Create a service backed by the AWS S3 client
    ///
    /// Credentials are resolved using the default credential provider chain; the
    /// region comes from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub async fn new(config: AuditConfig) -> AccessAnalyzerResult<Self> {
        validate(&config)?;

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;
        debug!("Loaded AWS configuration for region {}", config.region);

        Self::with_api(AwsS3Client::new(S3Client::new(&sdk_config)), config)
    }
}

impl<A: BucketApi> AuditService<A> {
    /// Create a service over any [`BucketApi`] implementation
    pub fn with_api(api: A, config: AuditConfig) -> AccessAnalyzerResult<Self> {
        validate(&config)?;
        Ok(Self { api, config })
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    // run() method implementation is in audit.rs
}

fn validate(config: &AuditConfig) -> AccessAnalyzerResult<()> {
    if config.region.trim().is_empty() {
        return Err(AccessAnalyzerError::config("region must not be empty"));
    }
    if config.concurrency == 0 {
        return Err(AccessAnalyzerError::config("concurrency must be at least 1"));
    }
    if config.retry.max_attempts == 0 {
        return Err(AccessAnalyzerError::config("max attempts must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBucketApi;

    #[test]
    fn test_with_api_accepts_default_config() {
        let service = AuditService::with_api(MockBucketApi::default(), AuditConfig::default())
            .expect("default config is valid");
        assert_eq!(service.config().concurrency, 1);
        assert_eq!(service.config().retry.max_attempts, 3);
        assert_eq!(service.config().region, "us-east-1");
    }

    #[test]
    fn test_with_api_rejects_invalid_config() {
        let cases = [
            AuditConfig {
                concurrency: 0,
                ..AuditConfig::default()
            },
            AuditConfig {
                region: " ".to_string(),
                ..AuditConfig::default()
            },
        ];
        for config in cases {
            let result = AuditService::with_api(MockBucketApi::default(), config);
            assert!(matches!(result, Err(AccessAnalyzerError::Config(_))));
        }

        let mut config = AuditConfig::default();
        config.retry.max_attempts = 0;
        assert!(matches!(
            AuditService::with_api(MockBucketApi::default(), config),
            Err(AccessAnalyzerError::Config(_))
        ));
    }
}
