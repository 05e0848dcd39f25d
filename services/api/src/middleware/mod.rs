pub mod auth;
pub mod preflight;
