// ABOUTME: Local short image names for the cluster loader.
// ABOUTME: Strips registry and namespace path, defaulting the tag to "latest".

use std::fmt;

pub const DEFAULT_TAG: &str = "latest";

/// Image name as known to the local runtime and cluster, e.g. `hello-go:latest`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalImageRef(String);

impl LocalImageRef {
    /// Derive the local name from any reference string.
    ///
    /// Takes the final `/`-separated segment and keeps it unchanged if it
    /// already carries a `:` (tag or digest), otherwise appends `:latest`.
    /// `ghcr.io/user/hello-go:v2` becomes `hello-go:v2`; `hello-go` becomes
    /// `hello-go:latest`.
    pub fn derive(reference: &str) -> Self {
        let last = reference.rsplit('/').next().unwrap_or(reference);
        if last.contains(':') {
            Self(last.to_string())
        } else {
            Self(format!("{last}:{DEFAULT_TAG}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
