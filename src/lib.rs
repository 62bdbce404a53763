//! reposcope: GitHub repository statistics, chart-embedding reports and
//! good-first-issue contribution guides.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
