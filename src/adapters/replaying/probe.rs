//! Replaying adapter for the `UrlProbe` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{PortFuture, UrlProbe};

/// Serves recorded probe results from a cassette.
pub struct ReplayingUrlProbe {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingUrlProbe {
    /// Creates a replaying probe backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl UrlProbe for ReplayingUrlProbe {
    fn probe_url<'a>(&'a self, _url: &'a str) -> PortFuture<'a, u16> {
        let result = replay_result(next_output(&self.replayer, "probe", "probe_url"), "probe", "probe_url");
        Box::pin(async move { result })
    }
}
