//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the repair engine and an
//! external system (the CKAN catalog, URL liveness probes).
//! Implementations live in `src/adapters/`.

pub mod catalog;
pub mod probe;

use std::future::Future;
use std::pin::Pin;

use crate::error::PortError;

pub use catalog::{Catalog, Dataset, DatasetResource, ResourceInfo, SearchEntry};
pub use probe::UrlProbe;

/// Boxed future returned by port methods, keeping the traits dyn-compatible.
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PortError>> + Send + 'a>>;
