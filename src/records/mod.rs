//! Doctor records: the in-memory collection and the file it lives in.
//!
//! The collection is loaded whole and written back whole; there is no
//! incremental log.

mod collection;
mod file;

pub use collection::Collection;
pub use file::{LoadState, RecordFile};
