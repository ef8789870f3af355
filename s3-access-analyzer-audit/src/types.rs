//! Shared data types for audit inputs and results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One bucket as returned by ListBuckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSummary {
    pub name: Option<String>,
}

impl BucketSummary {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// One entry of a bucket ACL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclGrant {
    /// Group URI of the grantee; only set for `Group` grantees.
    pub grantee_uri: Option<String>,
    pub permission: Option<String>,
}

/// Severity tag attached to every finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single risk observation about a bucket policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Audit outcome for one bucket: exposure verdict plus policy findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketAudit {
    pub bucket_name: String,
    pub public_access: bool,
    #[serde(rename = "PolicyIssues")]
    pub findings: Vec<Finding>,
}

impl BucketAudit {
    /// Number of findings tagged with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    }
}
