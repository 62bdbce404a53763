// reposcope shared type definitions
// Each submodule defines types used across the fetchers, composers and tools.

pub mod errors;
pub mod github;
pub mod issue;
pub mod repository;
pub mod settings;
