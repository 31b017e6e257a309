//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod blob_store_port;
mod source_port;

#[cfg(test)]
pub use blob_store_port::MockBlobStorePort;
pub use blob_store_port::BlobStorePort;
#[cfg(test)]
pub use source_port::MockSourcePort;
pub use source_port::SourcePort;
