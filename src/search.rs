//! Search results
//!
//! A [`Search`] is keyed by [`PackageId`]; iteration order is unspecified.

use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::collections::hash_map::Values;
use std::fmt;

use crate::contentdb::FetchPackage;
use crate::error::{DecodeError, Result};
use crate::package::{Package, PackageId, PackageType};

/// Wire shape of one element of a search response.
#[derive(Deserialize)]
struct SearchEntry {
    author: String,
    name: String,
    release: u64,
    short_description: String,
    title: String,
    package_type: PackageType,
    thumbnail: String,
}

/// A package summary returned by a catalog search.
#[derive(Clone)]
pub struct SearchItem<'c> {
    catalog: &'c dyn FetchPackage,
    pub author: String,
    pub name: String,
    pub release: u64,
    pub short_description: String,
    pub title: String,
    pub package_type: PackageType,
    pub thumbnail: String,
}

impl<'c> SearchItem<'c> {
    fn from_entry(catalog: &'c dyn FetchPackage, entry: SearchEntry) -> Self {
        Self {
            catalog,
            author: entry.author,
            name: entry.name,
            release: entry.release,
            short_description: entry.short_description,
            title: entry.title,
            package_type: entry.package_type,
            thumbnail: entry.thumbnail,
        }
    }

    pub fn identity(&self) -> PackageId {
        PackageId::new(&self.author, &self.name)
    }

    /// Fetches the full package definition from the catalog this item came from.
    pub async fn fetch(&self) -> Result<Package> {
        self.catalog.fetch(&self.author, &self.name).await
    }
}

impl fmt::Debug for SearchItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchItem")
            .field("author", &self.author)
            .field("name", &self.name)
            .field("release", &self.release)
            .field("short_description", &self.short_description)
            .field("title", &self.title)
            .field("package_type", &self.package_type)
            .field("thumbnail", &self.thumbnail)
            .finish_non_exhaustive()
    }
}

impl PartialEq for SearchItem<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.author == other.author
            && self.name == other.name
            && self.release == other.release
            && self.short_description == other.short_description
            && self.title == other.title
            && self.package_type == other.package_type
            && self.thumbnail == other.thumbnail
    }
}

impl Eq for SearchItem<'_> {}

/// The result of one catalog search query.
pub struct Search<'c> {
    catalog: &'c dyn FetchPackage,
    items: HashMap<PackageId, SearchItem<'c>>,
}

impl<'c> Search<'c> {
    /// Parses a search response body.
    ///
    /// When two entries share an (author, name) pair the later one wins.
    pub fn parse(catalog: &'c dyn FetchPackage, document: &str) -> Result<Self> {
        let entries: Vec<SearchEntry> =
            serde_json::from_str(document).map_err(DecodeError::Json)?;
        let total = entries.len();

        let mut items = HashMap::with_capacity(total);
        for entry in entries {
            let item = SearchItem::from_entry(catalog, entry);
            items.insert(item.identity(), item);
        }

        debug!(
            "Parsed {} search entries into {} packages",
            total,
            items.len()
        );

        Ok(Self { catalog, items })
    }

    /// The catalog that produced this result.
    pub fn catalog(&self) -> &'c dyn FetchPackage {
        self.catalog
    }

    /// Finds the item with the given author and name, if present.
    pub fn find(&self, author: &str, name: &str) -> Option<&SearchItem<'c>> {
        self.items.get(&PackageId::new(author, name))
    }

    /// Iterates over all items. Each call starts a fresh iteration.
    pub fn all_items(&self) -> Values<'_, PackageId, SearchItem<'c>> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Debug for Search<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Search")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl<'a, 'c> IntoIterator for &'a Search<'c> {
    type Item = &'a SearchItem<'c>;
    type IntoIter = Values<'a, PackageId, SearchItem<'c>>;

    fn into_iter(self) -> Self::IntoIter {
        self.all_items()
    }
}
