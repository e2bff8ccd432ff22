//! Infrastructure for ophthalmos: concrete collaborators and local files.
//!
//! # Module Structure
//!
//! - `http_backend`: REST client for the vision backend
//! - `memory_backend`: in-process backend for offline use and tests
//! - `dto`: wire formats spoken by the REST API
//! - `config_service`: loading and caching `config.toml`
//! - `state_repository`: the locally remembered account
//! - `paths`: where those files live

pub mod config_service;
pub mod dto;
pub mod http_backend;
pub mod memory_backend;
pub mod paths;
pub mod state_repository;

pub use crate::config_service::ConfigService;
pub use crate::http_backend::HttpVisionBackend;
pub use crate::memory_backend::InMemoryVisionBackend;
pub use crate::paths::OphthalmosPaths;
pub use crate::state_repository::{FileAccountStore, InMemoryAccountStore};
