//! Replaying adapter for the `Catalog` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{Catalog, Dataset, PortFuture, ResourceInfo, SearchEntry};

/// Serves recorded catalog responses from a cassette.
pub struct ReplayingCatalog {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingCatalog {
    /// Creates a replaying catalog backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn replay<T: serde::de::DeserializeOwned>(&self, method: &str) -> Result<T, crate::error::PortError> {
        replay_result(next_output(&self.replayer, "catalog", method), "catalog", method)
    }
}

impl Catalog for ReplayingCatalog {
    fn get_dataset<'a>(&'a self, _dataset_id: &'a str) -> PortFuture<'a, Dataset> {
        let result = self.replay("get_dataset");
        Box::pin(async move { result })
    }

    fn search_resources_by_name<'a>(&'a self, _name: &'a str) -> PortFuture<'a, Vec<SearchEntry>> {
        let result = self.replay("search_resources_by_name");
        Box::pin(async move { result })
    }

    fn get_resource<'a>(&'a self, _resource_id: &'a str) -> PortFuture<'a, ResourceInfo> {
        let result = self.replay("get_resource");
        Box::pin(async move { result })
    }

    fn patch_resource_url<'a>(&'a self, _resource_id: &'a str, _url: &'a str) -> PortFuture<'a, ()> {
        let result = self.replay("patch_resource_url");
        Box::pin(async move { result })
    }

    fn create_organization<'a>(
        &'a self,
        _organization: &'a serde_json::Value,
    ) -> PortFuture<'a, serde_json::Value> {
        let result = self.replay("create_organization");
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        let cassette =
            Cassette { name: "test".into(), recorded_at: Utc::now(), site: String::new(), interactions };
        CassetteReplayer::new(&cassette)
    }

    #[tokio::test]
    async fn replays_search_results() {
        let catalog = ReplayingCatalog::new(make_replayer(vec![Interaction {
            seq: 0,
            port: "catalog".into(),
            method: "search_resources_by_name".into(),
            input: json!({"name": "x.csv"}),
            output: json!({"Ok": [{"id": "a", "name": "x.csv", "url": "u", "package_id": "p"}]}),
        }]));

        let hits = catalog.search_resources_by_name("x.csv").await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].package_id, "p");
    }

    #[tokio::test]
    async fn replays_patch_failure() {
        let catalog = ReplayingCatalog::new(make_replayer(vec![Interaction {
            seq: 0,
            port: "catalog".into(),
            method: "patch_resource_url".into(),
            input: json!({"resource_id": "a", "url": "u"}),
            output: json!({"Err": "Authorization Error"}),
        }]));

        let err = catalog.patch_resource_url("a", "u").await.unwrap_err();

        assert!(err.to_string().contains("Authorization"));
    }
}
