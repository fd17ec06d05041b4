//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod extract;
pub mod fit;
pub mod outline;
