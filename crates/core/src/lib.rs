//! # Second Opinion Core
//!
//! Domain types, prompt assembly, and error definitions for the `second-opinion`
//! consultation tool. This crate has **no network or CLI dependencies** — it
//! defines the model that the config, provider and CLI crates build on.
//!
//! Pipeline, leaf-first:
//! - credential resolution (`second-opinion-config`)
//! - prompt assembly ([`prompt`])
//! - request building, bounded invocation, response extraction
//!   (`second-opinion-providers`)

pub mod error;
pub mod prompt;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{ContextReadError, Error, ProviderError, Result};
pub use prompt::{AssembledPrompt, ContextFile};
pub use provider::{Citation, ExtractedResult, InvocationOutcome, NO_RESPONSE_PLACEHOLDER};
