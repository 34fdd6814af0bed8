//! Recording adapter for the `Catalog` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{Catalog, Dataset, PortFuture, ResourceInfo, SearchEntry};

/// Records catalog calls while delegating to an inner implementation.
pub struct RecordingCatalog {
    inner: Box<dyn Catalog>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCatalog {
    /// Creates a recording catalog wrapping the given implementation.
    pub fn new(inner: Box<dyn Catalog>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Catalog for RecordingCatalog {
    fn get_dataset<'a>(&'a self, dataset_id: &'a str) -> PortFuture<'a, Dataset> {
        Box::pin(async move {
            let result = self.inner.get_dataset(dataset_id).await;
            let input = json!({ "dataset_id": dataset_id });
            record_result(&self.recorder, "catalog", "get_dataset", &input, &result);
            result
        })
    }

    fn search_resources_by_name<'a>(&'a self, name: &'a str) -> PortFuture<'a, Vec<SearchEntry>> {
        Box::pin(async move {
            let result = self.inner.search_resources_by_name(name).await;
            let input = json!({ "name": name });
            record_result(&self.recorder, "catalog", "search_resources_by_name", &input, &result);
            result
        })
    }

    fn get_resource<'a>(&'a self, resource_id: &'a str) -> PortFuture<'a, ResourceInfo> {
        Box::pin(async move {
            let result = self.inner.get_resource(resource_id).await;
            let input = json!({ "resource_id": resource_id });
            record_result(&self.recorder, "catalog", "get_resource", &input, &result);
            result
        })
    }

    fn patch_resource_url<'a>(&'a self, resource_id: &'a str, url: &'a str) -> PortFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.patch_resource_url(resource_id, url).await;
            let input = json!({ "resource_id": resource_id, "url": url });
            record_result(&self.recorder, "catalog", "patch_resource_url", &input, &result);
            result
        })
    }

    fn create_organization<'a>(
        &'a self,
        organization: &'a serde_json::Value,
    ) -> PortFuture<'a, serde_json::Value> {
        Box::pin(async move {
            let result = self.inner.create_organization(organization).await;
            record_result(&self.recorder, "catalog", "create_organization", organization, &result);
            result
        })
    }
}
