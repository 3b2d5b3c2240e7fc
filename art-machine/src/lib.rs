pub mod config;
pub mod handlers;
pub mod payload;
pub mod startup;

/// Identifier reported by the health endpoint and attached to traces.
pub const SERVICE_NAME: &str = "art-machine";
