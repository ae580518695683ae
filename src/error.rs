//! Per-endpoint request failure type.
//!
//! [`RequestFailure`] covers every condition that prevents the checker from
//! obtaining a complete HTTP response. An error *status* (4xx/5xx) is not a
//! failure: it arrives as an ordinary response and is reported as such.
//!
//! `reqwest::Error`'s own `Display` only prints the outermost layer
//! ("error sending request for url (...)"), which hides the useful part.
//! The display text here walks the whole source chain so the operator sees
//! the root cause, e.g. `connection refused` or a DNS lookup failure.

use std::error::Error as StdError;

/// A request that produced no usable response.
#[derive(Debug, thiserror::Error)]
pub enum RequestFailure {
    /// The request could not be sent or no response head was received
    /// (DNS, connect, TLS, timeout, malformed response).
    #[error("{}", describe(.0))]
    Send(#[source] reqwest::Error),

    /// A response head arrived but reading the body failed.
    #[error("reading response body: {}", describe(.0))]
    Body(#[source] reqwest::Error),
}

impl RequestFailure {
    /// Whether the failure was a client-side timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Send(e) | Self::Body(e) => e.is_timeout(),
        }
    }
}

/// Render an error and all of its sources as `outer: inner: root`.
///
/// Adjacent duplicates are skipped; hyper and the TLS backends sometimes
/// repeat the same message one level down.
pub fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = current {
        let msg = e.to_string();
        if !msg.is_empty() && parts.last() != Some(&msg) {
            parts.push(msg);
        }
        current = e.source();
    }

    if parts.is_empty() {
        return "unknown error".to_string();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fmt, io};

    #[derive(Debug)]
    struct Wrapper {
        msg: &'static str,
        inner: io::Error,
    }

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.msg)
        }
    }

    impl StdError for Wrapper {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.inner)
        }
    }

    // -----------------------------------------------------------------------
    // describe
    // -----------------------------------------------------------------------

    #[test]
    fn describe_joins_the_full_source_chain() {
        let err = Wrapper {
            msg: "error sending request",
            inner: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
        };
        assert_eq!(describe(&err), "error sending request: connection refused");
    }

    #[test]
    fn describe_skips_adjacent_duplicate_messages() {
        let err = Wrapper {
            msg: "connection refused",
            inner: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
        };
        assert_eq!(describe(&err), "connection refused");
    }

    #[test]
    fn describe_never_returns_empty_text() {
        let err = io::Error::other("");
        assert_eq!(describe(&err), "unknown error");
    }

    // -----------------------------------------------------------------------
    // RequestFailure
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn send_failure_display_includes_root_cause() {
        // Bind then drop to get a port nothing is listening on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/refill"))
            .send()
            .await
            .unwrap_err();
        let failure = RequestFailure::Send(err);

        let text = failure.to_string();
        assert!(text.contains("127.0.0.1"), "url missing from: {text}");
        assert!(
            text.to_lowercase().contains("refused") || text.to_lowercase().contains("connect"),
            "root cause missing from: {text}"
        );
        assert!(!failure.is_timeout());
    }
}
