//! Catalog port for reading and patching CKAN metadata.

use serde::{Deserialize, Serialize};

use super::PortFuture;

/// A dataset (CKAN package) with its resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset slug.
    pub name: String,
    /// Whether the dataset is hidden from the public.
    #[serde(default)]
    pub private: bool,
    /// Resources attached to the dataset.
    #[serde(default)]
    pub resources: Vec<DatasetResource>,
}

/// A resource as listed inside its dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetResource {
    /// Resource id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Resource URL; may be empty.
    #[serde(default)]
    pub url: String,
}

/// One hit of a resource name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Resource id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Resource URL.
    #[serde(default)]
    pub url: String,
    /// Owning dataset id.
    pub package_id: String,
}

/// The subset of a single resource's metadata the repair needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInfo {
    /// Resource id.
    pub id: String,
    /// Owning dataset id.
    pub package_id: String,
}

/// Reads and writes CKAN metadata.
///
/// Abstracting the catalog allows deterministic replay and testing
/// without touching a live portal.
pub trait Catalog: Send + Sync {
    /// Fetches a dataset and its resource list.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset does not exist or the request fails.
    fn get_dataset<'a>(&'a self, dataset_id: &'a str) -> PortFuture<'a, Dataset>;

    /// Searches resources by exact name. An empty list is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn search_resources_by_name<'a>(&'a self, name: &'a str) -> PortFuture<'a, Vec<SearchEntry>>;

    /// Fetches a single resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or the request fails.
    fn get_resource<'a>(&'a self, resource_id: &'a str) -> PortFuture<'a, ResourceInfo>;

    /// Replaces the URL of a resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog rejects the patch.
    fn patch_resource_url<'a>(&'a self, resource_id: &'a str, url: &'a str) -> PortFuture<'a, ()>;

    /// Creates an organization from a free-form CKAN payload and returns
    /// the created object.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog rejects the organization.
    fn create_organization<'a>(
        &'a self,
        organization: &'a serde_json::Value,
    ) -> PortFuture<'a, serde_json::Value>;
}
