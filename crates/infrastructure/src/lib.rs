//! Litmus Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest-backed implementation of the
//! application layer's `HttpClient` port and the loaders that read test
//! files and seed environments from disk.

pub mod adapters;
pub mod loader;

pub use adapters::{ClientConfig, DEFAULT_TIMEOUT_MS, ReqwestHttpClient};
pub use loader::{
    ENV_FILE_NAME, LegacyGetter, LoadError, LoadResult, TestFileFormat, load_environment,
    load_test_cases,
};
