//! Litmus Domain - Core test types
//!
//! This crate defines the data model for the Litmus HTTP test runner:
//! the run-scoped variable environment, declarative test cases and the
//! getter rules that extract, assert and propagate response values.
//! All types here are pure Rust with no I/O dependencies.

pub mod environment;
pub mod error;
pub mod request;
pub mod response;
pub mod testing;

pub use environment::{Environment, parse_override, render_value};
pub use error::{DomainError, DomainResult};
pub use request::HttpMethod;
pub use response::{ResponseHeaders, format_status, status_text};
pub use testing::{BodyModifier, GetterConfig, GetterSource, TestCase};
