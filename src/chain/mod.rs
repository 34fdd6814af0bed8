//! Predecessor chains of same-named resources.
//!
//! Each resource URL embeds the id of the resource it was derived from.
//! Records are kept in a flat arena (`Vec<ResourceRecord>`) and refer to
//! each other by id only.

pub mod link;
pub mod reconstruct;
pub mod record;

pub use link::{assign_successors, close_chain, ChainClosure};
pub use reconstruct::reconstruct;
pub use record::{parse_predecessor, Link, ResourceRecord};
