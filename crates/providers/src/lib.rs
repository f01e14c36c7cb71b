//! OpenAI Responses API plumbing for second-opinion.
//!
//! - [`request`] — builds the wire payload
//! - [`client`] — performs one deadline-bounded call
//! - [`extract`] — turns a success body into text and citations

pub mod client;
pub mod deadline;
pub mod extract;
pub mod request;

pub use client::ResponsesClient;
pub use deadline::{Deadline, Raced};
pub use extract::{extract, extract_value};
pub use request::RequestPayload;
