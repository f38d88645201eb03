//! Local file storage used by the service layer
//!
//! Seed data is read once at startup; backups are written only when the
//! remote store rejects a contact message.

pub mod seed;
pub mod backup;
