//! Request payload for the `/responses` endpoint.
//!
//! The payload is a pure function of `(model, prompt)`: one developer
//! instruction, the user prompt, a single web-search tool declaration,
//! and `store: false` so the service keeps no transcript.

use serde::Serialize;

/// Instruction sent ahead of every prompt.
pub const DEVELOPER_INSTRUCTION: &str = "Peer SWE consultant; use web search when helpful.";

/// Wire body for one consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPayload {
    pub model: String,
    pub input: Vec<InputMessage>,
    pub tools: Vec<WebSearchTool>,
    pub store: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRole {
    Developer,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputMessage {
    pub role: InputRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    WebSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Approximate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserLocation {
    #[serde(rename = "type")]
    pub kind: LocationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchContextSize {
    Medium,
}

/// The live-search capability declared on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WebSearchTool {
    #[serde(rename = "type")]
    pub kind: ToolKind,
    pub user_location: UserLocation,
    pub search_context_size: SearchContextSize,
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self {
            kind: ToolKind::WebSearch,
            user_location: UserLocation {
                kind: LocationKind::Approximate,
            },
            search_context_size: SearchContextSize::Medium,
        }
    }
}

impl RequestPayload {
    /// Build the payload for `prompt` against `model`.
    pub fn build(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: vec![
                InputMessage {
                    role: InputRole::Developer,
                    content: DEVELOPER_INSTRUCTION.into(),
                },
                InputMessage {
                    role: InputRole::User,
                    content: prompt.into(),
                },
            ],
            tools: vec![WebSearchTool::default()],
            store: false,
        }
    }
}
