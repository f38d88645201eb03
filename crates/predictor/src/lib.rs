//! Startup-success prediction: a random-forest classifier over founding year,
//! funding and label-encoded industry/country, plus the HTTP service that serves it.

pub mod errors;
pub mod encoder;
pub mod forest;
pub mod dataset;
pub mod bundle;
pub mod training;
pub mod routes;
pub mod startup;

pub use startup::run;
