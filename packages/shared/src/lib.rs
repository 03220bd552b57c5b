//! Shared utilities for the TutorLink relay packages.

pub mod logger;
pub mod time;
