//! Layered credential resolution.
//!
//! Secrets are looked up in a fixed chain of layers, earliest first:
//!
//! 1. `.env.local` in the working directory
//! 2. `.env` in the working directory
//! 3. the process environment
//!
//! Resolution is per name: the first layer holding a non-empty value wins,
//! so one name may come from `.env.local` while another comes from the
//! environment. Layers that don't exist contribute nothing.

use crate::ConfigError;
use crate::env_file;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_LOCAL_FILE: &str = ".env.local";
pub const ENV_FILE: &str = ".env";

/// One candidate source of secret values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLayer {
    /// A `KEY=VALUE` file.
    EnvFile { label: String, path: PathBuf },
    /// The ambient process environment.
    ProcessEnv,
}

impl SourceLayer {
    pub fn env_file(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::EnvFile {
            label: label.into(),
            path: path.into(),
        }
    }

    /// The standard chain for `dir`: `.env.local`, `.env`, environment.
    pub fn default_chain(dir: &Path) -> Vec<Self> {
        vec![
            Self::env_file(ENV_LOCAL_FILE, dir.join(ENV_LOCAL_FILE)),
            Self::env_file(ENV_FILE, dir.join(ENV_FILE)),
            Self::ProcessEnv,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            Self::EnvFile { label, .. } => label,
            Self::ProcessEnv => "system environment",
        }
    }
}

/// A resolved secret. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(String);

impl SecretValue {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// A complete name → value mapping for the requested names.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    values: BTreeMap<String, SecretValue>,
}

impl Secrets {
    pub fn get(&self, name: &str) -> Option<&SecretValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolves secrets from an ordered chain of [`SourceLayer`]s.
pub struct CredentialResolver {
    layers: Vec<SourceLayer>,
    env: EnvLookup,
}

impl CredentialResolver {
    /// The default chain rooted at `dir`, reading the real environment.
    pub fn new(dir: &Path) -> Self {
        Self::with_layers(SourceLayer::default_chain(dir))
    }

    pub fn with_layers(layers: Vec<SourceLayer>) -> Self {
        Self {
            layers,
            env: Box::new(|name: &str| std::env::var(name).ok()),
        }
    }

    /// Replace the process-environment lookup (used by tests).
    pub fn with_env_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.env = Box::new(lookup);
        self
    }

    /// Resolve every name in `names`.
    ///
    /// Fails once with all missing names if any name is undefined or empty
    /// in every layer.
    pub fn resolve(&self, names: &[&str]) -> Result<Secrets, ConfigError> {
        let file_values: Vec<Option<HashMap<String, String>>> = self
            .layers
            .iter()
            .map(|layer| match layer {
                SourceLayer::EnvFile { path, .. } => Some(env_file::load(path)),
                SourceLayer::ProcessEnv => None,
            })
            .collect();

        let mut values = BTreeMap::new();
        let mut missing = Vec::new();

        for &name in names {
            let found = self
                .layers
                .iter()
                .zip(&file_values)
                .find_map(|(layer, file)| {
                    let value = match file {
                        Some(vars) => vars.get(name).cloned(),
                        None => (self.env)(name),
                    };
                    value.filter(|v| !v.is_empty()).map(|v| (layer, v))
                });

            match found {
                Some((layer, value)) => {
                    debug!(name, layer = layer.label(), "Resolved secret");
                    values.insert(name.to_string(), SecretValue(value));
                }
                None => missing.push(name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(ConfigError::MissingSecrets {
                names: missing,
                searched: self.layers.iter().map(|l| l.label().to_string()).collect(),
            });
        }

        Ok(Secrets { values })
    }
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}
