//! Cycle tracking backend: daily symptom logs, period prediction, cycle
//! irregularity reports and wellness insights served over HTTP.

pub mod config;
pub mod cycle;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
