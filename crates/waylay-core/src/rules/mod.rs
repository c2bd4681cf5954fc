//! Built-in rule collections and their sample payloads.

pub mod auth;
pub mod catalog;
pub mod sample;
pub mod user;
