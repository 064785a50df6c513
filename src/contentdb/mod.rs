//! Catalog client
//!
//! [`ContentDb`] talks to a ContentDB instance: it builds endpoint URLs,
//! performs the search and package info requests, and hands response bodies
//! to the parsers in [`crate::package`] and [`crate::search`].

mod client;
pub mod url;

use async_trait::async_trait;

use crate::error::Result;
use crate::package::Package;

pub use client::{ContentDb, DEFAULT_BASE_ADDRESS, SearchStyle};

/// Resolves a package by its identity pair.
///
/// Search items hold a reference to one of these so they can fetch their
/// full record on demand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchPackage: Send + Sync {
    async fn fetch(&self, author: &str, name: &str) -> Result<Package>;
}
