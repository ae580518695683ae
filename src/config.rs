//! Configuration for endpoint-check.
//!
//! The checker runs against a built-in endpoint list and needs no
//! configuration at all. An optional TOML file, named by the
//! `ENDPOINT_CHECK_CONFIG` environment variable, can replace the list or set
//! a request timeout. A file is validated before any request goes out;
//! invalid files are rejected rather than silently falling back to defaults.
//!
//! # Example
//! ```toml
//! endpoints = [
//!     "https://api.medanpedia.co.id/refill",
//!     "https://api.medanpedia.co.id/refill_status",
//! ]
//! timeout_ms    = 10000
//! preview_chars = 200
//! ```

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::Context;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Environment variable naming an optional config file.
pub const CONFIG_ENV: &str = "ENDPOINT_CHECK_CONFIG";

/// Endpoints probed when no config file overrides them, in probe order.
pub const DEFAULT_ENDPOINTS: [&str; 2] = [
    "https://api.medanpedia.co.id/refill",
    "https://api.medanpedia.co.id/refill_status",
];

/// Top-level checker configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CheckerConfig {
    /// URLs to POST to, in order. Each is probed exactly once per run.
    #[serde(default = "defaults::endpoints")]
    pub endpoints: Vec<String>,

    /// Per-request timeout in milliseconds.
    ///
    /// Unset means no explicit timeout: a hanging endpoint stalls the run
    /// until the connection gives up on its own.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Number of body characters printed per response (default: 200).
    #[serde(default = "defaults::preview_chars")]
    pub preview_chars: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            endpoints: defaults::endpoints(),
            timeout_ms: None,
            preview_chars: defaults::preview_chars(),
        }
    }
}

impl CheckerConfig {
    /// Load from the file named by [`CONFIG_ENV`], or the built-in default
    /// when the variable is unset or empty.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_path_var(std::env::var_os(CONFIG_ENV))
    }

    fn from_path_var(value: Option<OsString>) -> anyhow::Result<Self> {
        match value.filter(|v| !v.is_empty()) {
            Some(path) => {
                let path = PathBuf::from(path);
                Self::load(&path)
                    .with_context(|| format!("loading config from {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Self = toml::from_str(&content).context("parsing config TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.endpoints.is_empty(), "`endpoints` must not be empty");

        for endpoint in &self.endpoints {
            let url = Url::parse(endpoint)
                .with_context(|| format!("endpoint `{endpoint}` is not a valid URL"))?;
            anyhow::ensure!(
                matches!(url.scheme(), "http" | "https"),
                "endpoint `{}` must use http or https, got `{}`",
                endpoint,
                url.scheme()
            );
        }

        anyhow::ensure!(self.preview_chars > 0, "`preview_chars` must be at least 1");
        anyhow::ensure!(
            self.timeout_ms != Some(0),
            "`timeout_ms` must be positive; omit it to disable the timeout"
        );

        Ok(())
    }
}

mod defaults {
    pub fn endpoints() -> Vec<String> {
        super::DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect()
    }
    pub fn preview_chars() -> usize { 200 }
}
