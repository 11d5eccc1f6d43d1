//! Catalog records
//!
//! A [`CatalogEntry`] is one record of the external item catalog, keyed by
//! the item's content checksum. Every descriptive field is optional because
//! the catalog may hold partial records; only complete records take part in
//! synchronization.

use serde::{Deserialize, Serialize};

use super::region::RegionCode;

/// Reserved catalog key for values stored outside any item section.
pub const SECTIONLESS_KEY: &str = "[<sectionless!>]";

/// Raw catalog record as read from the catalog store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Content checksum, the catalog key
    pub md5: String,
    /// Secondary checksum
    #[serde(default)]
    pub crc: Option<String>,
    /// Name stored in the item header
    #[serde(default)]
    pub header_name: Option<String>,
    /// Curated display ("good") name
    #[serde(default)]
    pub good_name: Option<String>,
    /// Region code as decimal text
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Descriptive fields of a complete catalog record, borrowed from the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteFields<'a> {
    pub md5: &'a str,
    pub crc: &'a str,
    pub header_name: &'a str,
    pub good_name: &'a str,
    pub region: RegionCode,
}

impl CatalogEntry {
    /// Creates a record with every descriptive field set
    pub fn new(
        md5: impl Into<String>,
        crc: impl Into<String>,
        header_name: impl Into<String>,
        good_name: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            md5: md5.into(),
            crc: Some(crc.into()),
            header_name: Some(header_name.into()),
            good_name: Some(good_name.into()),
            country_code: Some(country_code.into()),
        }
    }

    /// Returns true for the reserved sectionless pseudo-record
    pub fn is_sectionless(&self) -> bool {
        self.md5 == SECTIONLESS_KEY
    }

    /// Returns the descriptive fields if all four are present and the region
    /// code parses, `None` otherwise.
    pub fn complete_fields(&self) -> Option<CompleteFields<'_>> {
        let crc = present(&self.crc)?;
        let header_name = present(&self.header_name)?;
        let good_name = present(&self.good_name)?;
        let region = present(&self.country_code)?.parse().ok()?;

        Some(CompleteFields {
            md5: &self.md5,
            crc,
            header_name,
            good_name,
            region,
        })
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.trim().is_empty())
}
