//! Value Objects - Immutable, identity-less domain primitives

mod storage_key;

pub use storage_key::StorageKey;
