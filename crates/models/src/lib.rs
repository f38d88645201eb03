//! Request/response payloads and records shared by the backend and predictor services.

pub mod errors;
pub mod contact;
pub mod prediction;
