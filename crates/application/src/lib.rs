//! Litmus Application - Test execution engine
//!
//! This crate turns declarative test cases into checked HTTP exchanges:
//! - Template resolution of `{{variable}}` placeholders against the run environment
//! - Polymorphic extraction of values from response headers and JSON bodies
//! - Assertion and propagation of extracted values
//! - The fail-fast execution driver
//! - The `HttpClient` port the driver dispatches through

pub mod assertion;
pub mod error;
pub mod extract;
pub mod json_path;
pub mod ports;
pub mod runner;
pub mod variable_resolver;

pub use assertion::{
    AssertionError, GetterError, GetterOutcome, assert_value, check_value, propagate,
};
pub use error::{RunError, RunResult};
pub use extract::{
    BodyDecoder, BodyExtractor, ContentKind, DecodedBody, ExtractError, Extractor,
    ExtractorRegistry, HeaderExtractor, JsonBodyDecoder, JsonDocument,
};
pub use ports::{HttpClient, HttpClientError, HttpRequest, HttpResponse, ResponseBody};
pub use runner::{
    CaseFailure, CaseReport, NoopObserver, RunObserver, RunOptions, RunReport, RunState,
    TestRunner,
};
pub use variable_resolver::{
    BodyModifierError, ResolveError, TemplateError, TemplateResolver, apply_body_modifiers,
};
