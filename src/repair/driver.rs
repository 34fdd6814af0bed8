//! Dataset-level driver: probe every resource, repair the broken ones.

use crate::chain::ResourceRecord;
use crate::context::ServiceContext;
use crate::error::DriverError;
use crate::ports::Dataset;
use crate::repair::pipeline::{repair_resource, RepairOptions};
use crate::repair::report::{DatasetReport, RepairFailure};

/// Probe each resource of `dataset` and return those whose URL did not
/// answer at all. A response with any status counts as reachable.
pub async fn find_invalid_resources(
    ctx: &ServiceContext,
    dataset_id: &str,
    dataset: &Dataset,
) -> Vec<ResourceRecord> {
    let mut invalid = Vec::new();
    for resource in &dataset.resources {
        match ctx.probe.probe_url(&resource.url).await {
            Ok(status) => {
                tracing::debug!(resource_id = %resource.id, url = %resource.url, status, "resource reachable");
            }
            Err(err) => {
                tracing::debug!(resource_id = %resource.id, url = %resource.url, %err, "resource unreachable");
                invalid.push(ResourceRecord::invalid(
                    &resource.id,
                    &resource.name,
                    &resource.url,
                    dataset_id,
                ));
            }
        }
    }
    invalid
}

/// Repair every invalid resource of a private dataset.
///
/// Failures of individual resources are logged and collected in the
/// report; they never stop the run.
///
/// # Errors
///
/// Returns [`DriverError::DatasetFetch`] if the dataset cannot be read and
/// [`DriverError::PublicDataset`] if it is not private. Nothing is probed
/// or patched in either case.
pub async fn repair_dataset(
    ctx: &ServiceContext,
    dataset_id: &str,
    options: &RepairOptions,
) -> Result<DatasetReport, DriverError> {
    let dataset = ctx.catalog.get_dataset(dataset_id).await.map_err(|source| {
        DriverError::DatasetFetch { dataset_id: dataset_id.to_string(), source }
    })?;

    if !dataset.private {
        return Err(DriverError::PublicDataset { dataset_id: dataset_id.to_string() });
    }

    let invalid = find_invalid_resources(ctx, dataset_id, &dataset).await;
    let mut report = DatasetReport {
        dataset_id: dataset_id.to_string(),
        dataset_name: dataset.name.clone(),
        probed: dataset.resources.len(),
        invalid: invalid.iter().map(|r| r.id.clone()).collect(),
        ..DatasetReport::default()
    };

    if invalid.is_empty() {
        tracing::warn!(dataset_id, "no invalid resources found");
        return Ok(report);
    }
    tracing::info!(
        dataset = %dataset.name,
        dataset_id,
        count = invalid.len(),
        "found invalid resources"
    );

    let limit = options.limit.unwrap_or(invalid.len());
    report.skipped = invalid.len().saturating_sub(limit);

    for resource in invalid.iter().take(limit) {
        match repair_resource(ctx, resource, options).await {
            Ok(outcome) => {
                tracing::info!(name = %resource.name, resource_id = %resource.id, url = %outcome.url(), "{outcome}");
                report.outcomes.push(outcome);
            }
            Err(error) if error.is_already_repaired() => {
                tracing::info!(name = %resource.name, resource_id = %resource.id, "nothing to link, resource already repaired");
                report.already_repaired.push(resource.id.clone());
            }
            Err(error) => {
                tracing::error!(name = %resource.name, resource_id = %resource.id, %error, "resource could not be fixed");
                report.failures.push(RepairFailure {
                    resource_id: resource.id.clone(),
                    name: resource.name.clone(),
                    error,
                });
            }
        }
    }

    Ok(report)
}
