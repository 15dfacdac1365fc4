//! # Doctor Registry
//!
//! A single-user roster of doctors kept in one local JSON file.
//!
//! ## Core Concepts
//!
//! - **Store**: loads the whole collection at open and writes it back in
//!   full after every change
//! - **Ids**: assigned from a persisted counter, never reused
//! - **Names**: unique across the roster, ignoring case
//! - **Outcomes**: duplicate names and unknown ids are ordinary results, not
//!   errors
//!
//! ## Example
//!
//! ```no_run
//! use doctor_registry::{DoctorId, DoctorUpdate, NewDoctor, Store, StoreConfig};
//!
//! let mut store = Store::open(StoreConfig::at("./doctors.json"))?;
//!
//! let outcome = store.add(NewDoctor::new("Alice", "Cardiology", "a@x.com", "111"))?;
//! println!("{}", outcome);
//!
//! store.update(DoctorId(1), DoctorUpdate::new().email("alice@x.com"))?;
//!
//! for doctor in store.list("name") {
//!     println!("{} {}", doctor.id, doctor.name);
//! }
//! # Ok::<(), doctor_registry::RegistryError>(())
//! ```

pub mod error;
pub mod records;
pub mod shell;
pub mod store;
pub mod types;

// Re-exports
pub use error::{RegistryError, Result};
pub use records::{Collection, LoadState, RecordFile};
pub use shell::Shell;
pub use store::{CorruptFilePolicy, Store, StoreConfig};
pub use types::*;
