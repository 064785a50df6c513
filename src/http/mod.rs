//! HTTP transport module.

mod client;

pub use client::{DEFAULT_TIMEOUT, HttpClient, USER_AGENT};
