//! Live adapter for the `UrlProbe` port.

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;

use crate::error::PortError;
use crate::ports::{PortFuture, UrlProbe};

/// Sends real HEAD requests. Redirects are reported, not followed.
pub struct LiveUrlProbe {
    client: Client,
}

impl LiveUrlProbe {
    /// Creates a probe with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, PortError> {
        let client = Client::builder().redirect(Policy::none()).timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl UrlProbe for LiveUrlProbe {
    fn probe_url<'a>(&'a self, url: &'a str) -> PortFuture<'a, u16> {
        Box::pin(async move {
            let response = self
                .client
                .head(url)
                .send()
                .await
                .map_err(|e| -> PortError { format!("HEAD {url:?} failed: {e}").into() })?;
            Ok(response.status().as_u16())
        })
    }
}
