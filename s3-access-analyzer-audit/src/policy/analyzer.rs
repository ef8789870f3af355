//! Bucket policy risk rules
//!
//! [`analyze`] is a pure, order-preserving reduction over the policy statements.
//! Findings come out in statement order, then rule order within a statement, and
//! are never deduplicated: two offending statements yield two findings.

use crate::policy::document::{BucketPolicy, Effect, PolicyValue, Statement, WILDCARD};
use crate::types::{Finding, Severity};

/// Service-wide wildcard action for S3.
const S3_WILDCARD_ACTION: &str = "s3:*";

/// Service segment of an S3 ARN after `arn:<partition>:`.
const S3_ARN_SERVICE: &str = "s3:::";

pub const NO_POLICY: &str = "No bucket policy found";
pub const NO_ISSUES: &str = "No significant policy issues detected";
pub const ALL_PRINCIPALS: &str = "Policy allows access to all principals";
pub const ALL_ACTIONS: &str = "Policy allows all actions";
pub const OUTSIDE_BUCKET: &str = "Policy applies to resources outside this bucket";
pub const DENIES_ALL_ACTIONS: &str = "Policy denies all actions, which may be overly restrictive";
pub const USES_NOT_PRINCIPAL: &str = "Policy uses NotPrincipal, which can be complex and error-prone";

/// Analyze the policy attached to `bucket_name`.
///
/// Never returns an empty list: a policy with nothing to report yields a single
/// Info finding.
pub fn analyze(policy: &BucketPolicy, bucket_name: &str) -> Vec<Finding> {
    let document = match policy {
        BucketPolicy::Absent => return vec![Finding::new(Severity::Info, NO_POLICY)],
        BucketPolicy::Invalid(e) => return vec![Finding::new(Severity::Error, e.to_string())],
        BucketPolicy::Present(document) => document,
    };

    let mut findings: Vec<Finding> = document
        .statement
        .iter()
        .flat_map(|statement| analyze_statement(statement, bucket_name))
        .collect();

    if findings.is_empty() {
        findings.push(Finding::new(Severity::Info, NO_ISSUES));
    }
    findings
}

fn analyze_statement(statement: &Statement, bucket_name: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    match statement.effect {
        // Overly permissive grants
        Some(Effect::Allow) => {
            if statement.principal.contains_wildcard() {
                findings.push(Finding::new(Severity::High, ALL_PRINCIPALS));
            }
            if is_wildcard_action(&statement.action) {
                findings.push(Finding::new(Severity::High, ALL_ACTIONS));
            }
            if !is_resource_limited_to_bucket(&statement.resource, bucket_name) {
                findings.push(Finding::new(Severity::Medium, OUTSIDE_BUCKET));
            }
        }
        // Potentially over-restrictive denials
        Some(Effect::Deny) => {
            if is_wildcard_action(&statement.action) {
                findings.push(Finding::new(Severity::Medium, DENIES_ALL_ACTIONS));
            }
        }
        None => {}
    }

    if statement.has_not_principal {
        findings.push(Finding::new(Severity::Low, USES_NOT_PRINCIPAL));
    }

    findings
}

/// `*` and `s3:*` both grant every S3 action.
fn is_wildcard_action(action: &PolicyValue) -> bool {
    action
        .values()
        .any(|a| a == WILDCARD || a == S3_WILDCARD_ACTION)
}

/// True when every resource entry names this bucket or an object inside it,
/// in any partition (`aws`, `aws-cn`, `aws-us-gov`, ...).
/// A missing `Resource` element is not penalized.
fn is_resource_limited_to_bucket(resource: &PolicyValue, bucket_name: &str) -> bool {
    resource
        .values()
        .all(|r| is_within_bucket(r, bucket_name))
}

fn is_within_bucket(resource: &str, bucket_name: &str) -> bool {
    let Some((partition, rest)) = resource
        .strip_prefix("arn:")
        .and_then(|arn| arn.split_once(':'))
    else {
        return false;
    };
    !partition.is_empty()
        && rest
            .strip_prefix(S3_ARN_SERVICE)
            .and_then(|rest| rest.strip_prefix(bucket_name))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
