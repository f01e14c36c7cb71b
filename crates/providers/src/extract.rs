//! Tolerant extraction of answer text and citations from a responses body.
//!
//! The response shape is loosely specified, so nothing here fails. Answer
//! text comes from the first lookup that yields a non-empty string:
//!
//! 1. top-level `output_text`
//! 2. first `output[]` item with `type == "message"`, its `content[0].text`
//!
//! and otherwise falls back to [`NO_RESPONSE_PLACEHOLDER`]. Citations come
//! from the first `web_search_call` output item carrying `action.sources`.

use second_opinion_core::provider::{Citation, ExtractedResult, NO_RESPONSE_PLACEHOLDER};
use serde_json::Value;
use tracing::{debug, warn};

type AnswerLookup = fn(&Value) -> Option<String>;

/// Answer lookups in priority order. Keep this order as is.
const ANSWER_LOOKUPS: [AnswerLookup; 2] = [convenience_text, first_message_text];

/// Extract from a raw response body. Non-JSON bodies yield the placeholder.
pub fn extract(body: &str) -> ExtractedResult {
    match serde_json::from_str::<Value>(body) {
        Ok(doc) => extract_value(&doc),
        Err(e) => {
            warn!(error = %e, "Response body is not JSON");
            ExtractedResult::placeholder()
        }
    }
}

/// Extract from an already-parsed response document.
pub fn extract_value(doc: &Value) -> ExtractedResult {
    let text = ANSWER_LOOKUPS
        .iter()
        .find_map(|lookup| lookup(doc))
        .unwrap_or_else(|| {
            debug!("No answer text found in response");
            NO_RESPONSE_PLACEHOLDER.to_string()
        });

    ExtractedResult {
        text,
        citations: citations(doc),
    }
}

fn non_empty(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn output_items(doc: &Value) -> impl Iterator<Item = &Value> {
    doc.get("output")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn has_type(item: &Value, kind: &str) -> bool {
    item.get("type").and_then(Value::as_str) == Some(kind)
}

fn convenience_text(doc: &Value) -> Option<String> {
    doc.get("output_text").and_then(non_empty)
}

fn first_message_text(doc: &Value) -> Option<String> {
    output_items(doc)
        .find(|item| has_type(item, "message"))?
        .get("content")?
        .get(0)?
        .get("text")
        .and_then(non_empty)
}

fn citations(doc: &Value) -> Vec<Citation> {
    output_items(doc)
        .filter(|item| has_type(item, "web_search_call"))
        .find_map(|item| item.get("action")?.get("sources")?.as_array())
        .map(|sources| sources.iter().filter_map(citation).collect())
        .unwrap_or_default()
}

fn citation(source: &Value) -> Option<Citation> {
    let url = non_empty(source.get("url")?)?;
    let title = source.get("title").and_then(non_empty);
    Some(Citation { url, title })
}
