//! Altia Client - typed HTTP client for the cafe backend
//!
//! One strongly-typed method per REST endpoint, bearer-token auth on
//! every request, and status-code to error-taxonomy mapping.

pub mod client;
pub mod config;
pub mod error;
pub mod http;

pub use client::AltiaClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
