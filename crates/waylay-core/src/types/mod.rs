//! Core domain types for rules, request contexts, and response payloads.

pub mod context;
pub mod response;
pub mod rule;
