//! Report rendering
//!
//! Findings are printed exactly in the order the analyzer produced them.

use std::fmt::Write;

use crate::types::BucketAudit;

/// Render one bucket block of the text report, including its trailing blank line.
///
/// ```text
/// Bucket Name: my-bucket
/// Public Access: false
/// Policy Issues:
///   - Info: No bucket policy found
/// ```
pub fn render_text(audit: &BucketAudit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Bucket Name: {}", audit.bucket_name);
    let _ = writeln!(out, "Public Access: {}", audit.public_access);
    out.push_str("Policy Issues:\n");
    if audit.findings.is_empty() {
        out.push_str("  No issues detected\n");
    } else {
        for finding in &audit.findings {
            let _ = writeln!(out, "  - {}: {}", finding.severity, finding.message);
        }
    }
    out.push('\n');
    out
}

/// Render the whole audit as a pretty-printed JSON array.
pub fn render_json(audits: &[BucketAudit]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(audits)
}
