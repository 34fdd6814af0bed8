//! Per-port cassette selection for replay.

use std::path::PathBuf;

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Cassette file to replay for each port. A port without a path is left
/// unconfigured and panics when called.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Cassette for the catalog port.
    pub catalog: Option<PathBuf>,
    /// Cassette for the probe port.
    pub probe: Option<PathBuf>,
}

/// Loaded replayers, one per configured port.
pub struct PortReplayers {
    /// Replayer for the catalog port.
    pub catalog: Option<CassetteReplayer>,
    /// Replayer for the probe port.
    pub probe: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Use the same cassette file for every port.
    #[must_use]
    pub fn shared(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self { catalog: Some(path.clone()), probe: Some(path) }
    }

    /// Load every configured cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: &Option<PathBuf>, port: &str| -> Result<Option<CassetteReplayer>, String> {
            path.as_deref()
                .map(|p| Cassette::load(p).map(|c| CassetteReplayer::for_port(&c, port)))
                .transpose()
        };
        Ok(PortReplayers { catalog: load(&self.catalog, "catalog")?, probe: load(&self.probe, "probe")? })
    }
}
