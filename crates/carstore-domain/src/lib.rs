//! Domain types shared across the car store crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers and in the token claims.

pub mod rating;
pub mod user;
