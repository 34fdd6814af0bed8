//! `ckan-repair repair` command.

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::DriverError;
use crate::repair::{repair_dataset, RepairOptions};

/// Execute the `repair` command for each dataset in turn.
///
/// A public dataset is rejected and the next one is processed.
///
/// # Errors
///
/// Returns an error string if a dataset cannot be fetched; later datasets
/// are not processed.
pub async fn run(
    ctx: &ServiceContext,
    settings: &Settings,
    dataset_ids: &[String],
    dry_run: bool,
    limit: Option<usize>,
) -> Result<(), String> {
    if settings.is_production() {
        tracing::warn!(site = %settings.site_url, "running against the production server");
    }

    let options =
        RepairOptions { download_host: settings.download_host.clone(), dry_run, limit };

    for dataset_id in dataset_ids {
        match repair_dataset(ctx, dataset_id, &options).await {
            Ok(report) => {
                if dry_run {
                    println!("Dry run: no resources were patched.");
                }
                print!("{report}");
            }
            Err(err @ DriverError::PublicDataset { .. }) => {
                tracing::error!(%dataset_id, "{err}");
            }
            Err(err) => {
                tracing::error!(%dataset_id, "{err}");
                return Err(err.to_string());
            }
        }
    }
    Ok(())
}
