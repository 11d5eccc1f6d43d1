//! Catalog store port (driven/secondary port)
//!
//! Read-only access to the item catalog. The on-disk format and its parsing
//! belong to the adapter.

use crate::domain::CatalogEntry;

/// Port trait for the item catalog
///
/// Methods are synchronous: the catalog is loaded once and held in memory
/// by every implementation.
pub trait ICatalogStore: Send + Sync {
    /// Every record in store iteration order, including partial records
    fn entries(&self) -> Vec<CatalogEntry>;

    /// Looks up one record by its checksum key
    fn lookup(&self, md5: &str) -> Option<CatalogEntry>;
}
