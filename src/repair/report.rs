//! Per-dataset run report.

use std::fmt;

use crate::error::RepairError;
use crate::repair::pipeline::RepairOutcome;

/// A resource whose repair was abandoned.
#[derive(Debug)]
pub struct RepairFailure {
    /// The invalid resource.
    pub resource_id: String,
    /// Its display name.
    pub name: String,
    /// Why it could not be repaired.
    pub error: RepairError,
}

/// Everything a dataset run did.
#[derive(Debug, Default)]
pub struct DatasetReport {
    /// Dataset id as requested.
    pub dataset_id: String,
    /// Dataset slug.
    pub dataset_name: String,
    /// Number of resource URLs probed.
    pub probed: usize,
    /// Ids of resources whose URL did not answer.
    pub invalid: Vec<String>,
    /// Successful repairs (patched or dry-run).
    pub outcomes: Vec<RepairOutcome>,
    /// Invalid resources whose chain was already closed.
    pub already_repaired: Vec<String>,
    /// Invalid resources left as found.
    pub failures: Vec<RepairFailure>,
    /// Invalid resources not attempted because of `--limit`.
    pub skipped: usize,
}

impl DatasetReport {
    /// Number of resources patched in the catalog.
    #[must_use]
    pub fn patched(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, RepairOutcome::Patched { .. })).count()
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset: {} ({})", self.dataset_name, self.dataset_id)?;
        writeln!(f, "Probed {} resources, {} invalid", self.probed, self.invalid.len())?;
        for outcome in &self.outcomes {
            writeln!(f, "  {outcome}")?;
        }
        for id in &self.already_repaired {
            writeln!(f, "  nothing to do for {id}")?;
        }
        for failure in &self.failures {
            writeln!(f, "  failed {} ({}): {}", failure.name, failure.resource_id, failure.error)?;
        }
        if self.skipped > 0 {
            writeln!(f, "  {} not attempted (limit reached)", self.skipped)?;
        }
        Ok(())
    }
}
