//! Audit run for S3 Access Analyzer service

use futures::StreamExt;
use log::{debug, info, warn};

use crate::aws::{AwsError, BucketApi};
use crate::error::{AccessAnalyzerError, AccessAnalyzerResult};
use crate::exposure::is_public;
use crate::policy::{analyze, BucketPolicy, PolicyError};
use crate::retry::retry_with_backoff;
use crate::types::{BucketAudit, Severity};

impl<A: BucketApi> super::service::AuditService<A> {
    /// Audit every bucket in the account
    ///
    /// Lists buckets (retried with linear backoff), then checks each one for public
    /// exposure and analyzes its policy. Results come back in listing order, even
    /// when several buckets are audited concurrently.
    ///
    /// # Errors
    ///
    /// Only a listing failure that outlasts the retry budget is an error. Problems
    /// with an individual bucket show up as findings in its [`BucketAudit`].
    pub async fn run(&self) -> AccessAnalyzerResult<Vec<BucketAudit>> {
        let buckets = retry_with_backoff(&self.config.retry, || self.api.list_buckets())
            .await
            .map_err(|(source, attempts)| AccessAnalyzerError::Listing { attempts, source })?;

        let names: Vec<String> = buckets
            .into_iter()
            .filter_map(|bucket| {
                if bucket.name.is_none() {
                    warn!("Skipping bucket without a name in ListBuckets response");
                }
                bucket.name
            })
            .collect();
        info!("Auditing {} buckets", names.len());

        let audits: Vec<BucketAudit> = futures::stream::iter(names)
            .map(|name| self.audit_bucket(name))
            .buffered(self.config.concurrency)
            .collect()
            .await;

        info!(
            "Audited {} buckets: {} publicly accessible, {} high severity findings",
            audits.len(),
            audits.iter().filter(|audit| audit.public_access).count(),
            audits
                .iter()
                .map(|audit| audit.count(Severity::High))
                .sum::<usize>()
        );
        Ok(audits)
    }

    async fn audit_bucket(&self, bucket_name: String) -> BucketAudit {
        debug!("Auditing bucket {bucket_name}");
        let public_access = is_public(&self.api, &bucket_name).await;
        let policy = self.fetch_policy(&bucket_name).await;
        let findings = analyze(&policy, &bucket_name);

        BucketAudit {
            bucket_name,
            public_access,
            findings,
        }
    }

    /// Fetch and parse the bucket policy. "No policy" is not an error.
    async fn fetch_policy(&self, bucket_name: &str) -> BucketPolicy {
        match self.api.get_bucket_policy(bucket_name).await {
            Ok(raw) => BucketPolicy::from_raw(raw.as_deref()),
            Err(AwsError::PolicyNotFound(_)) => BucketPolicy::Absent,
            Err(e) => {
                warn!("Error retrieving policy for bucket {bucket_name}: {e}");
                BucketPolicy::Invalid(PolicyError::Fetch(e.to_string()))
            }
        }
    }
}
