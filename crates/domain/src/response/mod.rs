//! HTTP response domain types

mod headers;
mod status;

pub use headers::ResponseHeaders;
pub use status::{format_status, status_text};
