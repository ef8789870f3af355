//! Bucket policy document model
//!
//! S3 hands back policies as loosely-typed JSON: most statement elements may be a
//! string, a list of strings, or (for principals) a map of principal type to
//! identifiers. Parsing is deliberately permissive below the `Statement` list; an
//! element with a shape we don't recognize is treated as absent.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;

/// Wildcard token matching every principal, action or resource.
pub const WILDCARD: &str = "*";

/// Reasons a bucket policy could not be analyzed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Retrieving the policy from S3 failed for a reason other than "not found".
    #[error("Unable to retrieve bucket policy: {0}")]
    Fetch(String),

    /// The policy body is not valid JSON.
    #[error("Unable to parse bucket policy: {0}")]
    Json(String),

    /// The policy is JSON but lacks a usable `Statement` list.
    #[error("Invalid policy structure: {0}")]
    Structure(&'static str),
}

/// State of the policy attached to a bucket.
///
/// "No policy" and "a policy we could not read" carry different risk meaning,
/// so neither collapses into an empty document.
#[derive(Debug, Clone, PartialEq)]
pub enum BucketPolicy {
    Absent,
    Invalid(PolicyError),
    Present(PolicyDocument),
}

impl BucketPolicy {
    /// Build from the raw body S3 returned, if any.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Absent,
            Some(raw) => match parse(raw) {
                Ok(document) => Self::Present(document),
                Err(e) => Self::Invalid(e),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    /// Case-sensitive, as IAM evaluates it. Anything else is unrecognized.
    fn from_json(value: Option<&Value>) -> Option<Self> {
        match value.and_then(Value::as_str) {
            Some("Allow") => Some(Self::Allow),
            Some("Deny") => Some(Self::Deny),
            _ => None,
        }
    }
}

/// A statement element that may take several JSON shapes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PolicyValue {
    #[default]
    Absent,
    Single(String),
    Many(Vec<String>),
    /// Principal type (`AWS`, `Service`, `Federated`, ...) to identifiers.
    Structured(BTreeMap<String, PolicyValue>),
}

impl PolicyValue {
    /// Strings and string lists. Non-string list entries are dropped.
    fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => Self::Single(s.clone()),
            Some(Value::Array(items)) => Self::Many(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            _ => Self::Absent,
        }
    }

    /// Like [`Self::from_json`], additionally accepting a principal-type map.
    fn principal_from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(map)) => Self::Structured(
                map.iter()
                    .map(|(kind, ids)| (kind.clone(), Self::from_json(Some(ids))))
                    .collect(),
            ),
            other => Self::from_json(other),
        }
    }

    /// Iterate over every string carried by this value, at any nesting level.
    pub fn values(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Absent => Box::new(std::iter::empty()),
            Self::Single(s) => Box::new(std::iter::once(s.as_str())),
            Self::Many(items) => Box::new(items.iter().map(String::as_str)),
            Self::Structured(map) => Box::new(map.values().flat_map(PolicyValue::values)),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Whether the wildcard token appears anywhere in this value.
    pub fn contains_wildcard(&self) -> bool {
        self.values().any(|v| v == WILDCARD)
    }
}

/// One statement of a bucket policy. Read-only once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statement {
    /// `None` when the `Effect` element is missing or not `Allow`/`Deny`.
    pub effect: Option<Effect>,
    pub principal: PolicyValue,
    pub action: PolicyValue,
    pub resource: PolicyValue,
    /// Whether a `NotPrincipal` element is present, whatever its value.
    pub has_not_principal: bool,
}

impl Statement {
    fn from_json(statement: &Map<String, Value>) -> Self {
        Self {
            effect: Effect::from_json(statement.get("Effect")),
            principal: PolicyValue::principal_from_json(statement.get("Principal")),
            action: PolicyValue::from_json(statement.get("Action")),
            resource: PolicyValue::from_json(statement.get("Resource")),
            has_not_principal: statement.contains_key("NotPrincipal"),
        }
    }
}

/// A parsed bucket policy: its statements in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyDocument {
    pub statement: Vec<Statement>,
}

/// Parse raw policy JSON.
///
/// Top-level keys other than `Statement` (`Version`, `Id`, ...) are ignored.
/// Statement entries that are not JSON objects are skipped.
pub fn parse(raw: &str) -> Result<PolicyDocument, PolicyError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| PolicyError::Json(e.to_string()))?;

    let root = value
        .as_object()
        .ok_or(PolicyError::Structure("policy is not a JSON object"))?;
    let statements = root
        .get("Statement")
        .ok_or(PolicyError::Structure("missing Statement element"))?
        .as_array()
        .ok_or(PolicyError::Structure("Statement is not a list"))?;

    Ok(PolicyDocument {
        statement: statements
            .iter()
            .filter_map(Value::as_object)
            .map(Statement::from_json)
            .collect(),
    })
}
