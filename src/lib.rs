//! Scheduling records for a small dental practice.
//!
//! Providers, patients and appointments are JSON blobs in a key-value store,
//! owned and mutated exclusively by the [`Registry`].

pub mod domain;
pub use domain::{Appointment, Config, Patient, Provider, Specialty};

/// Key-value persistence for clinic records.
pub mod storage;
pub use storage::{FileStore, MemoryStore, Store};

/// The coordinating registry that owns all three collections.
pub mod registry;
pub use registry::{Availability, Registry};
