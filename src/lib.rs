//! Read-only client for the Minetest ContentDB package catalog.
//!
//! ```no_run
//! # async fn run() -> contentdb::Result<()> {
//! let db = contentdb::ContentDb::minetest()?;
//! let search = db.search("signs").await?;
//! if let Some(item) = search.find("Wuzzy", "basic_signs") {
//!     let package = item.fetch().await?;
//!     println!("{} ({})", package.title, package.license);
//! }
//! # Ok(())
//! # }
//! ```

pub mod contentdb;
pub mod error;
pub mod http;
pub mod package;
pub mod search;

pub use contentdb::{ContentDb, DEFAULT_BASE_ADDRESS, FetchPackage, SearchStyle};
pub use error::{DecodeError, Error, Result, TransportError};
pub use package::{Package, PackageId, PackageType};
pub use search::{Search, SearchItem};
