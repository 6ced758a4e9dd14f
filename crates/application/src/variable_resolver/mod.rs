//! Variable resolution module
//!
//! Provides strict parsing and resolution of `{{variable}}` syntax in the
//! templated fields of a test case.
//!
//! # Usage
//!
//! ```
//! use litmus_application::variable_resolver::TemplateResolver;
//! use litmus_domain::Environment;
//!
//! let mut env = Environment::new();
//! env.set("base", "example.com");
//!
//! let resolver = TemplateResolver::new(&env);
//! assert_eq!(resolver.resolve("http://{{base}}/get").unwrap(), "http://example.com/get");
//! ```

pub mod body;
pub mod engine;
pub mod parser;

pub use body::{BodyModifierError, apply_body_modifiers};
pub use engine::{ResolveError, TemplateResolver};
pub use parser::{TemplateError, VariableReference, is_valid_variable_name, parse_variables};
