//! Service layer for the backend: seed data merged with a remote key-value store,
//! plus the contact-message workflow.
//! - `remote` abstracts the store so handlers and tests can swap implementations.
//! - `storage` holds the local files: read-only seed data and best-effort backups.

pub mod errors;
pub mod remote;
pub mod storage;
pub mod catalog;
pub mod contact;
