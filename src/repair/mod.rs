//! Resource chain repair: URL correction, the per-resource pipeline, and
//! the dataset driver.

pub mod driver;
pub mod pipeline;
pub mod report;
pub mod url;

pub use driver::{find_invalid_resources, repair_dataset};
pub use pipeline::{repair_resource, RepairOptions, RepairOutcome};
pub use report::{DatasetReport, RepairFailure};
pub use url::corrected_url;
