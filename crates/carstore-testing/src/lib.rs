//! Test utilities for the car store service.
//!
//! Provides signed bearer identities and JSON payload fixtures.
//! Import from tests only, never from production code.

pub mod auth;
pub mod fixture;
