// ABOUTME: Inbound deployment trigger payload.
// ABOUTME: Decoded leniently from JSON; only the image drives the pipeline.

use serde::Deserialize;
use serde::de::Error as _;

/// Body of `POST /webhook` as sent by the CI workflow.
///
/// Missing fields decode as empty strings. `tag`, `ref` and `commit` are
/// informational and only appear in logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeploymentRequest {
    pub image: String,
    pub tag: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub commit: String,
}

impl DeploymentRequest {
    /// Decode a request body, which must be a JSON object.
    ///
    /// The derived visitor would also take a JSON array positionally.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom(
                "expected a JSON object with an \"image\" field",
            ));
        }
        serde_json::from_value(value)
    }
}
