//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{LiveCatalog, LiveUrlProbe};
use crate::adapters::recording::{RecordingCatalog, RecordingUrlProbe};
use crate::adapters::replaying::{ReplayingCatalog, ReplayingUrlProbe};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Settings;
use crate::error::PortError;
use crate::ports::{Catalog, Dataset, PortFuture, ResourceInfo, SearchEntry, UrlProbe};

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// CKAN catalog.
    pub catalog: Box<dyn Catalog>,
    /// URL liveness probe.
    pub probe: Box<dyn UrlProbe>,
}

impl ServiceContext {
    /// Creates a live context talking to the configured CKAN site.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(settings: &Settings) -> Result<Self, PortError> {
        Ok(Self {
            catalog: Box::new(LiveCatalog::new(&settings.site_url, &settings.api_key)),
            probe: Box::new(LiveUrlProbe::new(settings.probe_timeout)?),
        })
    }

    /// Creates a live context whose interactions are captured by `session`.
    ///
    /// Drop the context before calling [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn recording(settings: &Settings, session: &RecordingSession) -> Result<Self, PortError> {
        let live = Self::live(settings)?;
        Ok(Self {
            catalog: Box::new(RecordingCatalog::new(live.catalog, Arc::clone(&session.catalog))),
            probe: Box::new(RecordingUrlProbe::new(live.probe, Arc::clone(&session.probe))),
        })
    }

    /// Creates a replaying context from a single cassette file holding
    /// every port's interactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        Self::replaying_from(&CassetteConfig::shared(path))
    }

    /// Creates a replaying context from an in-memory cassette.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self {
            catalog: Box::new(ReplayingCatalog::new(CassetteReplayer::for_port(cassette, "catalog"))),
            probe: Box::new(ReplayingUrlProbe::new(CassetteReplayer::for_port(cassette, "probe"))),
        }
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette panic with a clear message when
    /// called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        Ok(Self {
            catalog: match replayers.catalog {
                Some(r) => Box::new(ReplayingCatalog::new(r)),
                None => Box::new(UnconfiguredCatalog),
            },
            probe: match replayers.probe {
                Some(r) => Box::new(ReplayingUrlProbe::new(r)),
                None => Box::new(UnconfiguredProbe),
            },
        })
    }
}

// --- Panicking adapters for ports without a cassette ---

const UNCONFIGURED: &str = "port not configured in CassetteConfig";

struct UnconfiguredCatalog;
impl Catalog for UnconfiguredCatalog {
    fn get_dataset<'a>(&'a self, _dataset_id: &'a str) -> PortFuture<'a, Dataset> {
        panic!("Catalog {UNCONFIGURED}: no cassette loaded for catalog::get_dataset");
    }
    fn search_resources_by_name<'a>(&'a self, _name: &'a str) -> PortFuture<'a, Vec<SearchEntry>> {
        panic!("Catalog {UNCONFIGURED}: no cassette loaded for catalog::search_resources_by_name");
    }
    fn get_resource<'a>(&'a self, _resource_id: &'a str) -> PortFuture<'a, ResourceInfo> {
        panic!("Catalog {UNCONFIGURED}: no cassette loaded for catalog::get_resource");
    }
    fn patch_resource_url<'a>(&'a self, _resource_id: &'a str, _url: &'a str) -> PortFuture<'a, ()> {
        panic!("Catalog {UNCONFIGURED}: no cassette loaded for catalog::patch_resource_url");
    }
    fn create_organization<'a>(
        &'a self,
        _organization: &'a serde_json::Value,
    ) -> PortFuture<'a, serde_json::Value> {
        panic!("Catalog {UNCONFIGURED}: no cassette loaded for catalog::create_organization");
    }
}

struct UnconfiguredProbe;
impl UrlProbe for UnconfiguredProbe {
    fn probe_url<'a>(&'a self, _url: &'a str) -> PortFuture<'a, u16> {
        panic!("UrlProbe {UNCONFIGURED}: no cassette loaded for probe::probe_url");
    }
}
