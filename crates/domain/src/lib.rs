//! Domain layer for the Open-Meteo ingest
//!
//! Contains the pure transformation from the upstream JSON document to
//! tabular CSV, the storage key value object, and domain errors.
//! This layer performs no I/O.

pub mod errors;
pub mod hourly_table;
pub mod value_objects;

pub use errors::DomainError;
pub use hourly_table::{HourlyTable, hourly_to_csv};
pub use value_objects::*;
