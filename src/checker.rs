//! The endpoint checker.
//!
//! A [`Checker`] owns one [`reqwest::Client`] and walks its endpoint list in
//! order, sending a single empty form POST to each. Every iteration ends in an
//! [`Outcome`]: either the response status with a body prefix, or the
//! [`RequestFailure`] that prevented a response. Failures never stop the run.

use std::{io::Write, time::Duration};

use anyhow::Context;
use reqwest::{header, Client};
use tracing::{debug, warn};

use crate::{config::CheckerConfig, error::RequestFailure, report};

/// Result of probing one endpoint.
#[derive(Debug)]
pub enum Outcome {
    /// A complete response was received, whatever its status code.
    Response { status: u16, body_prefix: String },
    /// No response could be obtained.
    Failure(RequestFailure),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// Sequential POST prober over a fixed endpoint list.
pub struct Checker {
    client: Client,
    endpoints: Vec<String>,
    preview_chars: usize,
}

impl Checker {
    /// Build a checker from a validated config.
    ///
    /// A timeout is applied only when `timeout_ms` is set; otherwise the
    /// client's default (none) stands.
    pub fn new(cfg: &CheckerConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(ms) = cfg.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build().context("building reqwest client")?;

        Ok(Self {
            client,
            endpoints: cfg.endpoints.clone(),
            preview_chars: cfg.preview_chars,
        })
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// POST an empty form to `url` and read the whole body.
    ///
    /// `Content-Length: 0` is set explicitly; hyper omits it for empty
    /// bodies and some front ends answer 411 without it.
    ///
    /// The body is read before anything is reported, so a transfer that
    /// breaks mid-body is a failure and no status line is printed for it.
    pub async fn check(&self, url: &str) -> Outcome {
        debug!(%url, "sending POST");

        let response = match self
            .client
            .post(url)
            .form(&[] as &[(&str, &str)])
            .header(header::CONTENT_LENGTH, "0")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Outcome::Failure(RequestFailure::Send(e)),
        };

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Outcome::Failure(RequestFailure::Body(e)),
        };

        debug!(%url, status, body_len = text.len(), "response received");
        Outcome::Response {
            status,
            body_prefix: report::body_prefix(&text, self.preview_chars),
        }
    }

    /// Probe every endpoint in order, writing the trace to `out`.
    ///
    /// Returns the outcomes in endpoint order. Only a failure to write to
    /// `out` is propagated; request failures are part of the trace.
    pub async fn run(&self, out: &mut impl Write) -> std::io::Result<Vec<Outcome>> {
        let mut outcomes = Vec::with_capacity(self.endpoints.len());

        for url in &self.endpoints {
            report::write_checking(out, url)?;

            let outcome = self.check(url).await;
            if let Outcome::Failure(err) = &outcome {
                warn!(%url, error = %err, timeout = err.is_timeout(), "endpoint check failed");
            }

            report::write_outcome(out, url, &outcome)?;
            report::write_separator(out)?;
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
