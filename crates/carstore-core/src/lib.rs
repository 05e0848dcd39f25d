//! Ambient building blocks shared by the car store service: configuration loading,
//! tracing setup, request ids, health probes, time budgets and timestamp formatting.

pub mod budget;
pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
