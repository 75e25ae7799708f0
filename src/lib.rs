// ABOUTME: Library root for deploy-hook - exposes the pipeline and receiver for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod runner;
pub mod server;
pub mod types;
