//! In-memory [`BucketApi`] for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::aws::{AwsError, AwsResult, BucketApi};
use crate::types::{AclGrant, BucketSummary};

/// Scripted S3 responses keyed by bucket name.
///
/// Buckets without a scripted policy answer `NoSuchBucketPolicy`; missing policy
/// status and ACL entries answer "not public" and "no grants".
#[derive(Default)]
pub(crate) struct MockBucketApi {
    buckets: Vec<BucketSummary>,
    list_failures: u32,
    policies: HashMap<String, Result<Option<String>, &'static str>>,
    policy_status: HashMap<String, Result<bool, &'static str>>,
    acls: HashMap<String, Result<Vec<AclGrant>, &'static str>>,
    list_calls: AtomicU32,
    acl_calls: AtomicU32,
}

impl MockBucketApi {
    pub(crate) fn with_buckets(mut self, names: &[&str]) -> Self {
        self.buckets = names.iter().map(|name| BucketSummary::named(*name)).collect();
        self
    }

    pub(crate) fn with_unnamed_bucket(mut self) -> Self {
        self.buckets.push(BucketSummary { name: None });
        self
    }

    /// Fail the first `failures` ListBuckets calls.
    pub(crate) fn with_list_failures(mut self, failures: u32) -> Self {
        self.list_failures = failures;
        self
    }

    pub(crate) fn with_policy(mut self, bucket: &str, policy: Result<Option<&str>, &'static str>) -> Self {
        self.policies
            .insert(bucket.to_string(), policy.map(|p| p.map(str::to_string)));
        self
    }

    pub(crate) fn with_policy_status(mut self, bucket: &str, status: Result<bool, &'static str>) -> Self {
        self.policy_status.insert(bucket.to_string(), status);
        self
    }

    pub(crate) fn with_acl(mut self, bucket: &str, acl: Result<Vec<AclGrant>, &'static str>) -> Self {
        self.acls.insert(bucket.to_string(), acl);
        self
    }

    pub(crate) fn grant(uri: Option<&str>) -> AclGrant {
        AclGrant {
            grantee_uri: uri.map(str::to_string),
            permission: Some("READ".to_string()),
        }
    }

    pub(crate) fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn acl_calls(&self) -> u32 {
        self.acl_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BucketApi for MockBucketApi {
    async fn list_buckets(&self) -> AwsResult<Vec<BucketSummary>> {
        let call = self.list_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.list_failures {
            return Err(AwsError::S3Error(format!("ListBuckets failure {call}")));
        }
        Ok(self.buckets.clone())
    }

    async fn get_bucket_policy(&self, bucket: &str) -> AwsResult<Option<String>> {
        match self.policies.get(bucket) {
            None => Err(AwsError::PolicyNotFound(bucket.to_string())),
            Some(Ok(policy)) => Ok(policy.clone()),
            Some(Err(e)) => Err(AwsError::S3Error((*e).to_string())),
        }
    }

    async fn get_bucket_policy_status(&self, bucket: &str) -> AwsResult<bool> {
        match self.policy_status.get(bucket) {
            None => Ok(false),
            Some(Ok(public)) => Ok(*public),
            Some(Err(e)) => Err(AwsError::S3Error((*e).to_string())),
        }
    }

    async fn get_bucket_acl(&self, bucket: &str) -> AwsResult<Vec<AclGrant>> {
        self.acl_calls.fetch_add(1, Ordering::SeqCst);
        match self.acls.get(bucket) {
            None => Ok(Vec::new()),
            Some(Ok(grants)) => Ok(grants.clone()),
            Some(Err(e)) => Err(AwsError::S3Error((*e).to_string())),
        }
    }
}
