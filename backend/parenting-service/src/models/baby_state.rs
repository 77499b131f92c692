use serde::{Deserialize, Serialize};
use std::fmt;

/// Photo analysis request. `api_key` lets a client supply its own model key.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeBabyStateRequest {
    #[serde(default)]
    pub photo_data_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl fmt::Debug for AnalyzeBabyStateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzeBabyStateRequest")
            .field("photo_data_uri_len", &self.photo_data_uri.len())
            .field("api_key", &self.api_key.as_ref().map(|_| "****"))
            .finish()
    }
}

/// The model's read of the baby in the photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BabyState {
    /// Perceived mood (e.g. happy, fussy, sleepy)
    pub mood: String,
    /// What the baby appears to be doing (e.g. sleeping, playing, crying)
    pub activity: String,
    /// Potential needs or observations for the parent
    #[serde(default)]
    pub needs: Vec<String>,
    pub is_asleep: bool,
}
