//! Liveness probe port.

use super::PortFuture;

/// Checks whether a URL answers.
pub trait UrlProbe: Send + Sync {
    /// Sends a HEAD request without following redirects and returns the
    /// status code.
    ///
    /// # Errors
    ///
    /// Returns an error when no response is received: malformed URL,
    /// connection failure, or timeout.
    fn probe_url<'a>(&'a self, url: &'a str) -> PortFuture<'a, u16>;
}
