//! Public exposure check
//!
//! Combines two S3 signals into one verdict: the policy status flag S3 computes
//! from the bucket policy, and the bucket ACL. The check is best effort. A signal
//! that cannot be fetched counts as `false` and the other one is still consulted.

use log::{debug, warn};

use crate::aws::BucketApi;
use crate::types::AclGrant;

/// Grantee URI of the group representing anonymous access.
pub const ALL_USERS_GROUP_URI: &str = "http://acs.amazonaws.com/groups/global/AllUsers";

/// Whether `bucket` is publicly accessible.
///
/// Short-circuits on the policy status flag. Fetch failures are logged and never
/// surface as errors, so an unreachable bucket reports `false`.
pub async fn is_public(api: &dyn BucketApi, bucket: &str) -> bool {
    match api.get_bucket_policy_status(bucket).await {
        Ok(true) => {
            debug!("Bucket {bucket} is public according to its policy status");
            return true;
        }
        Ok(false) => {}
        Err(e) => warn!("Error checking policy status for bucket {bucket}: {e}"),
    }

    match api.get_bucket_acl(bucket).await {
        Ok(grants) => match all_users_grant(&grants) {
            Some(grant) => {
                debug!(
                    "Bucket {bucket} is public through an AllUsers ACL grant ({})",
                    grant.permission.as_deref().unwrap_or("unknown permission")
                );
                true
            }
            None => false,
        },
        Err(e) => {
            warn!("Error checking ACL for bucket {bucket}: {e}");
            false
        }
    }
}

fn all_users_grant(grants: &[AclGrant]) -> Option<&AclGrant> {
    grants
        .iter()
        .find(|grant| grant.grantee_uri.as_deref() == Some(ALL_USERS_GROUP_URI))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBucketApi;

    const AUTHENTICATED_USERS_URI: &str =
        "http://acs.amazonaws.com/groups/global/AuthenticatedUsers";

    #[tokio::test]
    async fn test_policy_status_public_skips_acl() {
        let api = MockBucketApi::default().with_policy_status("b", Ok(true));

        assert!(is_public(&api, "b").await);
        assert_eq!(api.acl_calls(), 0);
    }

    #[tokio::test]
    async fn test_acl_all_users_grant_is_public() {
        let api = MockBucketApi::default()
            .with_policy_status("b", Ok(false))
            .with_acl(
                "b",
                Ok(vec![
                    MockBucketApi::grant(None),
                    MockBucketApi::grant(Some(ALL_USERS_GROUP_URI)),
                ]),
            );

        assert!(is_public(&api, "b").await);
    }

    #[test]
    fn test_all_users_grant_returns_matching_entry() {
        let mut write = MockBucketApi::grant(Some(ALL_USERS_GROUP_URI));
        write.permission = Some("WRITE".to_string());
        let grants = vec![MockBucketApi::grant(Some(AUTHENTICATED_USERS_URI)), write];

        let grant = all_users_grant(&grants).expect("AllUsers grant present");
        assert_eq!(grant.permission.as_deref(), Some("WRITE"));
        assert!(all_users_grant(&grants[..1]).is_none());
    }

    #[tokio::test]
    async fn test_private_bucket() {
        let api = MockBucketApi::default()
            .with_policy_status("b", Ok(false))
            .with_acl(
                "b",
                Ok(vec![
                    MockBucketApi::grant(None),
                    MockBucketApi::grant(Some(AUTHENTICATED_USERS_URI)),
                ]),
            );

        assert!(!is_public(&api, "b").await);
        assert_eq!(api.acl_calls(), 1);
    }

    #[tokio::test]
    async fn test_policy_status_error_still_checks_acl() {
        let api = MockBucketApi::default()
            .with_policy_status("b", Err("AccessDenied"))
            .with_acl("b", Ok(vec![MockBucketApi::grant(Some(ALL_USERS_GROUP_URI))]));

        assert!(is_public(&api, "b").await);
    }

    #[tokio::test]
    async fn test_both_signals_failing_is_not_public() {
        let api = MockBucketApi::default()
            .with_policy_status("b", Err("AccessDenied"))
            .with_acl("b", Err("AccessDenied"));

        assert!(!is_public(&api, "b").await);
    }
}
