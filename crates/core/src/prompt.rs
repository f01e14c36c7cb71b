//! Prompt assembly — merges the user's message with context files.
//!
//! The assembled prompt is the message, optionally followed by a
//! `# Context Files` section holding one `## <path>` block per readable
//! file, with the file's verbatim content inside a backtick fence.
//!
//! Files are processed independently and in the order given. A file that
//! cannot be read is skipped and reported as a [`ContextReadError`]; the
//! remaining files are still included. Duplicate paths are not collapsed.

use crate::error::ContextReadError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Separator placed between the message and the context section.
const CONTEXT_HEADER: &str = "\n\n---\n\n# Context Files\n\n";

/// A context file requested by the caller.
#[derive(Debug)]
pub struct ContextFile {
    /// The path exactly as supplied (used as the block label).
    pub requested: String,
    /// The path resolved against the working directory.
    pub absolute: PathBuf,
    /// The file content, or why it could not be read.
    pub content: std::result::Result<String, ContextReadError>,
}

impl ContextFile {
    /// Resolve `requested` against `cwd` and read it. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn load(requested: &str, cwd: &Path) -> Self {
        let absolute = cwd.join(requested);
        let content = std::fs::read(&absolute)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .map_err(|e| ContextReadError {
                path: requested.to_string(),
                reason: e.to_string(),
            });
        Self {
            requested: requested.to_string(),
            absolute,
            content,
        }
    }

    /// Render this file as a labeled, fenced block. `None` if it was unreadable.
    fn render_block(&self) -> Option<String> {
        let content = self.content.as_ref().ok()?;
        let fence = fence_for(content);
        Some(format!(
            "\n## {}\n\n{fence}\n{content}\n{fence}\n\n",
            self.requested
        ))
    }
}

/// The composed prompt plus diagnostics for files that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    pub text: String,
    /// One entry per unreadable file, in input order.
    pub diagnostics: Vec<ContextReadError>,
}

impl AssembledPrompt {
    /// Build the prompt for `message` with `files` resolved relative to `cwd`.
    pub fn assemble(message: &str, files: &[String], cwd: &Path) -> Self {
        if files.is_empty() {
            return Self {
                text: message.to_string(),
                diagnostics: Vec::new(),
            };
        }

        let mut text = String::with_capacity(message.len() + CONTEXT_HEADER.len());
        text.push_str(message);
        text.push_str(CONTEXT_HEADER);

        let mut diagnostics = Vec::new();
        for requested in files {
            let file = ContextFile::load(requested, cwd);
            match file.render_block() {
                Some(block) => {
                    debug!(file = %file.absolute.display(), "Loaded context file");
                    text.push_str(&block);
                }
                None => {
                    if let Err(e) = file.content {
                        debug!(file = %e.path, reason = %e.reason, "Skipping unreadable context file");
                        diagnostics.push(e);
                    }
                }
            }
        }

        debug!(
            files = files.len(),
            skipped = diagnostics.len(),
            prompt_len = text.len(),
            "Prompt assembled"
        );

        Self { text, diagnostics }
    }
}

/// A backtick fence longer than any backtick run inside `content`.
fn fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in content.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat(longest.max(2) + 1)
}
