// ABOUTME: Kubernetes object name validation for the target workload.
// ABOUTME: Deployment and container names must be RFC 1123 labels.

use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkloadNameError {
    #[error("workload name cannot be empty")]
    Empty,

    #[error("workload name exceeds maximum length of 63 characters")]
    TooLong,

    #[error("workload name cannot start or end with a hyphen")]
    EdgeHyphen,

    #[error("invalid character in workload name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct WorkloadName(Cow<'static, str>);

impl WorkloadName {
    /// Wrap a compile-time name without validating it.
    ///
    /// Callers must keep `value` an RFC 1123 label; covered by tests.
    pub(crate) const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    pub fn new(value: &str) -> Result<Self, WorkloadNameError> {
        if value.is_empty() {
            return Err(WorkloadNameError::Empty);
        }

        if value.len() > 63 {
            return Err(WorkloadNameError::TooLong);
        }

        if value.starts_with('-') || value.ends_with('-') {
            return Err(WorkloadNameError::EdgeHyphen);
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
        {
            return Err(WorkloadNameError::InvalidChar(c));
        }

        Ok(Self(Cow::Owned(value.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WorkloadName {
    type Error = WorkloadNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl fmt::Display for WorkloadName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
