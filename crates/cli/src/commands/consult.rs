//! `second-opinion --message ...` — the consultation pipeline.
//!
//! Strictly sequential: resolve the API key, assemble the prompt, build
//! the payload, make one bounded call, extract and render the answer.

use second_opinion_config::{API_KEY_VAR, CredentialResolver, Settings};
use second_opinion_core::error::{Error, Result};
use second_opinion_core::prompt::AssembledPrompt;
use second_opinion_providers::{RequestPayload, ResponsesClient, extract};
use std::path::PathBuf;
use std::time::Duration;

use crate::render;

/// Inputs gathered from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConsultOptions {
    pub message: String,
    pub files: Vec<String>,
    pub model: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl ConsultOptions {
    /// Context file paths, trimmed, with empty entries dropped.
    fn context_files(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Run one consultation. `cwd` roots the env files and relative context paths.
pub async fn run(options: ConsultOptions, cwd: std::io::Result<PathBuf>) -> Result<()> {
    if options.message.trim().is_empty() {
        return Err(Error::Argument("--message required".into()));
    }

    let cwd = cwd?;

    let secrets = CredentialResolver::new(&cwd).resolve(&[API_KEY_VAR])?;
    let api_key = secrets
        .get(API_KEY_VAR)
        .ok_or_else(|| Error::Config {
            message: format!("{API_KEY_VAR} not resolved"),
        })?
        .expose()
        .to_string();

    let mut settings = Settings::from_env()?;
    if let Some(model) = options.model.clone() {
        settings.model = model;
    }
    if let Some(ms) = options.timeout_ms {
        settings.timeout = Duration::from_millis(ms);
    }

    let prompt = AssembledPrompt::assemble(&options.message, &options.context_files(), &cwd);
    {
        let mut stderr = std::io::stderr().lock();
        for diagnostic in &prompt.diagnostics {
            render::warning(&mut stderr, diagnostic);
        }
    }

    let payload = RequestPayload::build(&settings.model, prompt.text);
    let client = ResponsesClient::new(&settings.base_url, api_key)?;

    let body = client.invoke(&payload, settings.timeout).await.into_result()?;
    let result = extract(&body);

    render::response(&mut std::io::stdout().lock(), &result)?;

    Ok(())
}
