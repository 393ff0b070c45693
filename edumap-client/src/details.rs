use serde::{Deserialize, Serialize};

/// Supplementary attributes served by the live-details endpoint. These are
/// fetched on demand, never bundled in the static dataset, and every field
/// is best-effort: the panel renders without them when the fetch fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveDetails {
    #[serde(default)]
    pub in_session: bool,
    #[serde(default)]
    pub admission_ongoing: bool,
    #[serde(default)]
    pub vice_chancellor: Option<String>,
}

/// The live-details endpoint wraps its payload in an `ai_response` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct LiveDetailsEnvelope {
    pub ai_response: LiveDetails,
}

/// The chatbot endpoint returns its reply as an `ai_response` string.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatEnvelope {
    pub ai_response: String,
}
