//! Package records
//!
//! A [`Package`] is the full definition of one catalog package, as returned
//! by the package info endpoint. Records only come into existence through
//! [`Package::parse`]; there is no partially filled or default instance.

mod id;
pub mod timestamp;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

use crate::error::{DecodeError, Result};

pub use id::{PackageId, PackageType};

/// A full package definition from the catalog.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Package {
    pub name: String,
    pub author: String,
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    pub repo: String,
    /// Capability names this package exposes.
    pub provides: BTreeSet<String>,
    pub release: u64,
    pub score: i64,
    pub license: String,
    pub created_at: DateTime<Utc>,
    pub maintainers: Vec<String>,
    pub website: Option<String>,
    pub issue_tracker: Option<String>,
    pub thumbnail: Option<String>,
    pub screenshots: Option<Vec<String>>,
}

/// Wire shape of a package info response, before timestamp parsing.
#[derive(Deserialize)]
struct PackageDocument {
    name: String,
    author: String,
    title: String,
    short_description: String,
    long_description: String,
    repo: String,
    provides: BTreeSet<String>,
    release: u64,
    #[serde(deserialize_with = "deserialize_score")]
    score: i64,
    license: String,
    created_at: String,
    maintainers: Vec<String>,
    website: Option<String>,
    issue_tracker: Option<String>,
    thumbnail: Option<String>,
    screenshots: Option<Vec<String>>,
}

impl Package {
    /// Parses a package info response body.
    pub fn parse(document: &str) -> Result<Self> {
        let raw: PackageDocument = serde_json::from_str(document).map_err(DecodeError::Json)?;
        let created_at = timestamp::parse(&raw.created_at)?;

        let package = Package {
            name: raw.name,
            author: raw.author,
            title: raw.title,
            short_description: raw.short_description,
            long_description: raw.long_description,
            repo: raw.repo,
            provides: raw.provides,
            release: raw.release,
            score: raw.score,
            license: raw.license,
            created_at,
            maintainers: raw.maintainers,
            website: raw.website,
            issue_tracker: raw.issue_tracker,
            thumbnail: raw.thumbnail,
            screenshots: raw.screenshots,
        };

        debug!(
            "Parsed package {} (release {})",
            package.identity(),
            package.release
        );
        Ok(package)
    }

    pub fn identity(&self) -> PackageId {
        PackageId::new(&self.author, &self.name)
    }

    /// `created_at` formatted back to ISO-8601.
    pub fn created_at_iso(&self) -> String {
        timestamp::format(&self.created_at)
    }

    pub fn provides(&self, capability: &str) -> bool {
        self.provides.contains(capability)
    }
}

// Scores are fractional on the live catalog; keep the integer part.
fn deserialize_score<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_i64()
        .or_else(|| number.as_f64().map(|f| f.trunc() as i64))
        .ok_or_else(|| serde::de::Error::custom(format!("score out of range: {}", number)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::{package_json, package_value};

    #[test]
    fn test_parse_package_fields() {
        let package = Package::parse(&package_json()).unwrap();

        assert_eq!(package.name, "basic_signs");
        assert_eq!(package.author, "Wuzzy");
        assert_eq!(package.title, "Basic Signs");
        assert_eq!(package.short_description, "Signs");
        assert_eq!(package.long_description, "Adds signs you can write on.");
        assert_eq!(package.repo, "https://repo.or.cz/minetest_basic_signs.git");
        assert_eq!(
            package.provides,
            BTreeSet::from(["basic_signs".to_string(), "signs".to_string()])
        );
        assert_eq!(package.release, 7);
        assert_eq!(package.score, 120);
        assert_eq!(package.license, "MIT");
        assert_eq!(package.maintainers, vec!["Wuzzy", "rubenwardy"]);
        assert_eq!(package.website, Some("https://example.org/signs".to_string()));
        assert_eq!(package.issue_tracker, None);
        assert_eq!(
            package.thumbnail,
            Some("https://content.minetest.net/thumbnails/1/abc.png".to_string())
        );
        assert_eq!(
            package.screenshots,
            Some(vec!["https://content.minetest.net/uploads/abc.png".to_string()])
        );
        assert_eq!(package.identity(), PackageId::new("Wuzzy", "basic_signs"));
        assert!(package.provides("signs"));
        assert!(!package.provides("default"));
    }

    #[test]
    fn test_created_at_round_trips() {
        let package = Package::parse(&package_json()).unwrap();
        assert_eq!(
            package
                .created_at
                .naive_utc()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            "2018-05-14T22:02:54.227418"
        );
        assert_eq!(package.created_at_iso(), "2018-05-14T22:02:54.227418Z");
    }

    #[test]
    fn test_missing_license_fails() {
        let mut value = package_value();
        value.as_object_mut().unwrap().remove("license");

        let err = Package::parse(&value.to_string()).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_missing_required_fields_fail() {
        for field in [
            "name",
            "author",
            "title",
            "short_description",
            "long_description",
            "repo",
            "provides",
            "release",
            "score",
            "created_at",
            "maintainers",
        ] {
            let mut value = package_value();
            value.as_object_mut().unwrap().remove(field);
            let result = Package::parse(&value.to_string());
            assert!(
                result.as_ref().is_err_and(|e| e.is_decode()),
                "missing {} should fail",
                field
            );
        }
    }

    #[test]
    fn test_optional_fields_absent_or_null() {
        let mut value = package_value();
        let fields = value.as_object_mut().unwrap();
        fields.remove("website");
        fields.remove("issue_tracker");
        fields.insert("thumbnail".to_string(), serde_json::Value::Null);
        fields.insert("screenshots".to_string(), serde_json::Value::Null);

        let package = Package::parse(&value.to_string()).unwrap();
        assert_eq!(package.website, None);
        assert_eq!(package.issue_tracker, None);
        assert_eq!(package.thumbnail, None);
        assert_eq!(package.screenshots, None);
    }

    #[test]
    fn test_release_must_be_numeric() {
        let mut value = package_value();
        value["release"] = serde_json::json!("7");
        assert!(Package::parse(&value.to_string()).unwrap_err().is_decode());
    }

    #[test]
    fn test_fractional_score_is_truncated() {
        let mut value = package_value();
        value["score"] = serde_json::json!(512.87);
        assert_eq!(Package::parse(&value.to_string()).unwrap().score, 512);

        value["score"] = serde_json::json!("512");
        assert!(Package::parse(&value.to_string()).is_err());
    }

    #[test]
    fn test_invalid_created_at_fails() {
        let mut value = package_value();
        value["created_at"] = serde_json::json!("last tuesday");
        let err = Package::parse(&value.to_string()).unwrap_err();
        assert!(
            matches!(&err, Error::Decode(DecodeError::Timestamp { value }) if value == "last tuesday"),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn test_created_at_wrong_type_is_json_error() {
        let mut value = package_value();
        value["created_at"] = serde_json::json!(1526335374);
        let err = Package::parse(&value.to_string()).unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::Json(_))));
    }

    #[test]
    fn test_not_an_object_fails() {
        assert!(Package::parse("[]").unwrap_err().is_decode());
        assert!(Package::parse("not json").unwrap_err().is_decode());
        assert!(Package::parse("").unwrap_err().is_decode());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut value = package_value();
        value["downloads"] = serde_json::json!(1234);
        value["tags"] = serde_json::json!(["building"]);
        assert!(Package::parse(&value.to_string()).is_ok());
    }

    #[test]
    fn test_serialize_reparses_to_same_record() {
        let package = Package::parse(&package_json()).unwrap();
        let json = serde_json::to_string(&package).unwrap();
        assert_eq!(Package::parse(&json).unwrap(), package);
    }
}
