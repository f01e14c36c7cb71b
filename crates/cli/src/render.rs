//! Terminal rendering for responses, warnings and fatal errors.

use second_opinion_core::error::{ContextReadError, Error, ProviderError};
use second_opinion_core::provider::ExtractedResult;
use std::io::Write;

const BANNER: &str = "=== PEER CONSULTANT RESPONSE ===";

/// Print the answer and, when present, the sources used.
pub fn response(out: &mut impl Write, result: &ExtractedResult) -> std::io::Result<()> {
    writeln!(out, "\n{BANNER}\n")?;
    writeln!(out, "## Response\n")?;
    writeln!(out, "{}", result.text)?;

    if !result.citations.is_empty() {
        writeln!(out, "\n## Sources Used\n")?;
        for citation in &result.citations {
            writeln!(out, "- {}", citation.display_title())?;
            writeln!(out, "  {}", citation.url)?;
        }
    }

    out.flush()
}

/// Report a context file that was skipped.
pub fn warning(out: &mut impl Write, diagnostic: &ContextReadError) {
    let _ = writeln!(out, "Warning: {diagnostic}");
}

/// Report a fatal error.
pub fn error(out: &mut impl Write, err: &Error) {
    let _ = match err {
        Error::Provider(e @ ProviderError::Api { status, .. }) => writeln!(
            out,
            "Error: API request failed with status {status}\n{}",
            e.body().unwrap_or_default()
        ),
        Error::Provider(ProviderError::Timeout { after_ms }) => {
            writeln!(out, "Error: Request timed out after {after_ms}ms")
        }
        Error::Provider(ProviderError::Network(message)) => {
            writeln!(out, "Error calling peer consultant: {message}")
        }
        Error::Provider(other) => writeln!(out, "Error: {other}"),
        Error::Config { message } => writeln!(out, "Error: {message}"),
        Error::Argument(message) => writeln!(out, "Error: {message}"),
        Error::Io(e) => writeln!(out, "Error: {e}"),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use second_opinion_core::provider::Citation;

    fn rendered(result: &ExtractedResult) -> String {
        let mut buf = Vec::new();
        response(&mut buf, result).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn rendered_error(err: &Error) -> String {
        let mut buf = Vec::new();
        error(&mut buf, err);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn response_without_citations_has_no_sources_section() {
        let out = rendered(&ExtractedResult {
            text: "Use a mutex.".into(),
            citations: vec![],
        });
        assert_eq!(
            out,
            "\n=== PEER CONSULTANT RESPONSE ===\n\n## Response\n\nUse a mutex.\n"
        );
    }

    #[test]
    fn response_lists_citations_in_order() {
        let out = rendered(&ExtractedResult {
            text: "answer".into(),
            citations: vec![
                Citation {
                    url: "https://docs.rs".into(),
                    title: Some("Docs".into()),
                },
                Citation {
                    url: "https://crates.io".into(),
                    title: None,
                },
            ],
        });
        assert!(out.ends_with(
            "## Sources Used\n\n- Docs\n  https://docs.rs\n- https://crates.io\n  https://crates.io\n"
        ));
    }

    #[test]
    fn placeholder_still_renders() {
        let out = rendered(&ExtractedResult::placeholder());
        assert!(out.contains("## Response\n\nNo response generated\n"));
    }

    #[test]
    fn http_failure_prints_status_and_body() {
        let out = rendered_error(&Error::Provider(ProviderError::Api {
            status: 500,
            body: "{\"error\":\"boom\"}".into(),
        }));
        assert_eq!(
            out,
            "Error: API request failed with status 500\n{\"error\":\"boom\"}\n"
        );
    }

    #[test]
    fn timeout_and_transport_are_worded_differently() {
        let timeout = rendered_error(&Error::Provider(ProviderError::Timeout { after_ms: 100 }));
        let network = rendered_error(&Error::Provider(ProviderError::Network(
            "connection refused".into(),
        )));
        assert_eq!(timeout, "Error: Request timed out after 100ms\n");
        assert_eq!(network, "Error calling peer consultant: connection refused\n");
    }

    #[test]
    fn warning_names_the_file() {
        let mut buf = Vec::new();
        warning(
            &mut buf,
            &ContextReadError {
                path: "b.txt".into(),
                reason: "No such file or directory (os error 2)".into(),
            },
        );
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Warning: Could not read file b.txt: No such file or directory (os error 2)\n"
        );
    }
}
