//! Recording adapter for the `UrlProbe` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{PortFuture, UrlProbe};

/// Records probe results while delegating to an inner implementation.
pub struct RecordingUrlProbe {
    inner: Box<dyn UrlProbe>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingUrlProbe {
    /// Creates a recording probe wrapping the given implementation.
    pub fn new(inner: Box<dyn UrlProbe>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl UrlProbe for RecordingUrlProbe {
    fn probe_url<'a>(&'a self, url: &'a str) -> PortFuture<'a, u16> {
        Box::pin(async move {
            let result = self.inner.probe_url(url).await;
            record_result(&self.recorder, "probe", "probe_url", &json!({ "url": url }), &result);
            result
        })
    }
}
