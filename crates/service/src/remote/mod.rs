//! Remote JSON key-value store abstraction and its implementations.

pub mod kv_store;
pub mod firebase;
pub mod memory;

pub use kv_store::RemoteStore;
