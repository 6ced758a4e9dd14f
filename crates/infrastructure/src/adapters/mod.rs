//! Transport adapters.

mod reqwest_client;

pub use reqwest_client::{ClientConfig, DEFAULT_TIMEOUT_MS, ReqwestHttpClient};
