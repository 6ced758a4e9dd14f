//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the execution engine and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod http_client;

pub use http_client::{HttpClient, HttpClientError, HttpRequest, HttpResponse, ResponseBody};
