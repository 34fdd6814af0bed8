//! Live adapters for real external interactions.

pub mod catalog;
pub mod probe;

pub use catalog::LiveCatalog;
pub use probe::LiveUrlProbe;
