use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};

use super::FetchPackage;
use super::url;
use crate::error::Result;
use crate::http::HttpClient;
use crate::package::Package;
use crate::search::Search;

/// The public Minetest ContentDB instance.
pub const DEFAULT_BASE_ADDRESS: &str = "https://content.minetest.net";

/// How [`ContentDb::search`] puts the query into the request URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStyle {
    /// `?q=<query>` is encoded as a path component:
    /// `{base}/api/packages/%3Fq%3D<query>`.
    #[default]
    PathSegment,
    /// A real query string: `{base}/api/packages?q=<query>`.
    QueryString,
}

/// A ContentDB provider.
#[derive(Debug, Clone)]
pub struct ContentDb {
    http: HttpClient,
    base_address: Url,
    search_style: SearchStyle,
}

impl ContentDb {
    /// Creates a client for `base_address`, or for [`DEFAULT_BASE_ADDRESS`] when `None`.
    #[tracing::instrument(skip(client))]
    pub fn new(client: Client, base_address: Option<String>) -> Result<Self> {
        let base_address = base_address.unwrap_or_else(|| DEFAULT_BASE_ADDRESS.to_string());
        let base_address = url::parse_base(&base_address)?;
        debug!("Using ContentDB at {}", base_address);

        Ok(Self {
            http: HttpClient::new(client),
            base_address,
            search_style: SearchStyle::default(),
        })
    }

    /// The default client for the public Minetest ContentDB.
    pub fn minetest() -> Result<Self> {
        Self::new(HttpClient::default_client()?, None)
    }

    pub fn with_search_style(mut self, search_style: SearchStyle) -> Self {
        self.search_style = search_style;
        self
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    pub fn search_style(&self) -> SearchStyle {
        self.search_style
    }

    /// Joins a full URL from the base address and path components.
    pub fn make_url(&self, components: &[&str]) -> Result<Url> {
        url::join(&self.base_address, components)
    }

    /// Search endpoint URL with the query encoded into the path.
    pub fn search_url(&self, query: &str) -> Result<Url> {
        self.make_url(&["api/packages", &format!("?q={}", query)])
    }

    /// Search endpoint URL with the query in a real query string.
    pub fn query_url(&self, query: &str) -> Result<Url> {
        let mut url = self.make_url(&["api/packages"])?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    /// Package info endpoint URL for one package.
    pub fn package_url(&self, author: &str, name: &str) -> Result<Url> {
        self.make_url(&["api/packages", author, name])
    }

    /// Searches the catalog for packages matching `query`.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Search<'_>> {
        let url = match self.search_style {
            SearchStyle::PathSegment => self.search_url(query)?,
            SearchStyle::QueryString => self.query_url(query)?,
        };

        debug!("Searching {} for '{}'...", self.base_address, query);
        let body = self.http.get_text(&url).await?;

        Search::parse(self, &body)
    }

    /// Fetches the full definition of one package.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, author: &str, name: &str) -> Result<Package> {
        let url = self.package_url(author, name)?;

        debug!("Fetching package {}/{} from {}...", author, name, url);
        let body = self.http.get_text(&url).await?;

        Package::parse(&body)
    }
}

#[async_trait]
impl FetchPackage for ContentDb {
    async fn fetch(&self, author: &str, name: &str) -> Result<Package> {
        ContentDb::fetch(self, author, name).await
    }
}
