//! Error types for chain repair, the dataset driver, and configuration.

use thiserror::Error;

/// Boxed error returned across port boundaries.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Why a single invalid resource could not be repaired.
///
/// Every variant is recovered at resource granularity: the driver logs it
/// and moves on to the next invalid resource.
#[derive(Debug, Error)]
pub enum RepairError {
    /// No `/resource/<id>/` segment could be extracted from the URL.
    #[error("no predecessor id found in url {url:?}")]
    UnparseableUrl {
        /// The URL that failed to parse.
        url: String,
    },

    /// The name search returned nothing.
    #[error("no resources found for {name}")]
    NoSearchResults {
        /// The search key.
        name: String,
    },

    /// The name search itself failed.
    #[error("resource search for {name} failed: {source}")]
    Search {
        /// The search key.
        name: String,
        /// Underlying catalog error.
        #[source]
        source: PortError,
    },

    /// The faulty or the last record of the chain could not be identified.
    #[error("could not find faulty or last resource (faulty found: {faulty_found}, last found: {last_found})")]
    ChainIncomplete {
        /// Whether a record with an unparseable link was present.
        faulty_found: bool,
        /// Whether a record without successor was present.
        last_found: bool,
    },

    /// Looking up the predecessor resource for its package id failed.
    #[error("lookup of resource {resource_id} failed: {source}")]
    ResourceLookup {
        /// The predecessor resource id.
        resource_id: String,
        /// Underlying catalog error.
        #[source]
        source: PortError,
    },

    /// The corrected URL did not answer with 200 or 302.
    #[error("corrected url {url} did not validate (status: {})", .status.map_or_else(|| "no response".to_string(), |s| s.to_string()))]
    ValidationFailed {
        /// The URL that was probed.
        url: String,
        /// HTTP status, or `None` when the probe itself failed.
        status: Option<u16>,
    },

    /// Writing the corrected URL back to the catalog failed.
    #[error("patching resource {resource_id} with {url} failed: {source}")]
    PatchFailed {
        /// The resource that was being patched.
        resource_id: String,
        /// The corrected URL.
        url: String,
        /// Underlying catalog error.
        #[source]
        source: PortError,
    },
}

impl RepairError {
    /// Whether this error means the chain is already closed and there is
    /// nothing left to link.
    #[must_use]
    pub fn is_already_repaired(&self) -> bool {
        matches!(self, Self::ChainIncomplete { .. })
    }
}

/// Failures that stop a dataset run before any resource is repaired.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The dataset could not be fetched.
    #[error("failed to fetch dataset {dataset_id}: {source}")]
    DatasetFetch {
        /// The requested dataset.
        dataset_id: String,
        /// Underlying catalog error.
        #[source]
        source: PortError,
    },

    /// The dataset is public and must not be mutated.
    #[error("dataset is not private ({dataset_id})")]
    PublicDataset {
        /// The rejected dataset.
        dataset_id: String,
    },
}

/// Invalid or missing configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// The site URL could not be parsed or has no host.
    #[error("invalid CKAN_SITE_URL {url:?}: {reason}")]
    InvalidSiteUrl {
        /// The configured value.
        url: String,
        /// Parser message.
        reason: String,
    },
}
