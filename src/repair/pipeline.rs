//! Repair of a single invalid resource.
//!
//! Each step is fallible and short-circuits with a typed [`RepairError`]:
//! search, reconstruct, close the chain, look up the package, validate
//! the corrected URL, patch.

use std::fmt;

use crate::chain::{close_chain, reconstruct, ResourceRecord};
use crate::context::ServiceContext;
use crate::error::RepairError;
use crate::repair::url::{corrected_url, is_accepted};

/// Knobs shared by every repair in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOptions {
    /// Host used in corrected URLs.
    pub download_host: String,
    /// Validate but do not patch.
    pub dry_run: bool,
    /// Repair at most this many invalid resources.
    pub limit: Option<usize>,
}

impl RepairOptions {
    /// Options that patch every invalid resource on `download_host`.
    #[must_use]
    pub fn new(download_host: impl Into<String>) -> Self {
        Self { download_host: download_host.into(), dry_run: false, limit: None }
    }
}

/// What happened to a resource that was repaired successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The corrected URL was written back.
    Patched {
        /// Patched resource.
        resource_id: String,
        /// New URL.
        url: String,
    },
    /// The corrected URL validated; nothing was written.
    DryRun {
        /// Resource that would be patched.
        resource_id: String,
        /// URL it would receive.
        url: String,
    },
}

impl RepairOutcome {
    /// The resource the outcome refers to.
    #[must_use]
    pub fn resource_id(&self) -> &str {
        match self {
            Self::Patched { resource_id, .. } | Self::DryRun { resource_id, .. } => resource_id,
        }
    }

    /// The corrected URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Patched { url, .. } | Self::DryRun { url, .. } => url,
        }
    }
}

impl fmt::Display for RepairOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patched { resource_id, url } => write!(f, "patched {resource_id} -> {url}"),
            Self::DryRun { resource_id, url } => write!(f, "would patch {resource_id} -> {url}"),
        }
    }
}

/// Repair one invalid resource, using its lowercased name as search key.
///
/// At most one patch is issued, and only after the corrected URL has
/// answered 200 or 302.
///
/// # Errors
///
/// Returns the [`RepairError`] of the first step that failed; the
/// resource is then left untouched.
pub async fn repair_resource(
    ctx: &ServiceContext,
    invalid: &ResourceRecord,
    options: &RepairOptions,
) -> Result<RepairOutcome, RepairError> {
    let name = invalid.name.to_lowercase();

    let entries = ctx
        .catalog
        .search_resources_by_name(&name)
        .await
        .map_err(|source| RepairError::Search { name: name.clone(), source })?;
    tracing::debug!(name = %name, hits = entries.len(), "searched resources by name");

    let mut records = reconstruct(&name, &entries, invalid)?;
    let closure = close_chain(&mut records)?;
    let faulty = &records[closure.faulty];
    let predecessor_id = faulty.predecessor().unwrap_or(faulty.id.as_str());

    if faulty.id != invalid.id {
        tracing::warn!(
            invalid_id = %invalid.id,
            faulty_id = %faulty.id,
            "faulty resource differs from the probed one"
        );
    }
    tracing::debug!(faulty = %faulty, last = %records[closure.last], "closed chain");

    let package_id = ctx
        .catalog
        .get_resource(predecessor_id)
        .await
        .map_err(|source| RepairError::ResourceLookup {
            resource_id: predecessor_id.to_string(),
            source,
        })?
        .package_id;

    let url = corrected_url(&options.download_host, &package_id, predecessor_id, &faulty.name);

    let status = match ctx.probe.probe_url(&url).await {
        Ok(status) => status,
        Err(err) => {
            tracing::debug!(%url, %err, "probe of corrected url failed");
            return Err(RepairError::ValidationFailed { url, status: None });
        }
    };
    if !is_accepted(status) {
        return Err(RepairError::ValidationFailed { url, status: Some(status) });
    }

    let resource_id = faulty.id.clone();
    if options.dry_run {
        return Ok(RepairOutcome::DryRun { resource_id, url });
    }

    ctx.catalog.patch_resource_url(&resource_id, &url).await.map_err(|source| {
        RepairError::PatchFailed { resource_id: resource_id.clone(), url: url.clone(), source }
    })?;

    Ok(RepairOutcome::Patched { resource_id, url })
}
