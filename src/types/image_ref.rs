// ABOUTME: Remote container image reference validation.
// ABOUTME: Accepts registry/namespace/name[:tag][@digest] strings safe to pass to the image tool.

use super::LocalImageRef;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseImageRefError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid character in image reference: {0:?}")]
    InvalidChar(char),

    #[error("image reference cannot start with '-': {0}")]
    LeadingHyphen(String),
}

/// A remote image reference as published by the build, e.g. `ghcr.io/org/app:v1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn parse(input: &str) -> Result<Self, ParseImageRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseImageRefError::Empty);
        }

        // Would be read as an option by the image tool
        if input.starts_with('-') {
            return Err(ParseImageRefError::LeadingHyphen(input.to_string()));
        }

        if let Some(c) = input.chars().find(|c| !is_reference_char(*c)) {
            return Err(ParseImageRefError::InvalidChar(c));
        }

        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The short name the cluster loader resolves this image by.
    pub fn local(&self) -> LocalImageRef {
        LocalImageRef::derive(&self.0)
    }
}

fn is_reference_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '-' | '_' | '@')
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
