//! Item resolution use case
//!
//! Turns a [`SyncRequest`] into the ordered list of [`TargetItem`]s a run
//! will look for in the remote listing.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{SyncRequest, TargetItem};
use crate::ports::ICatalogStore;

/// Use case for resolving a request into target items
pub struct ResolveItemsUseCase {
    catalog: Arc<dyn ICatalogStore + Send + Sync>,
}

impl ResolveItemsUseCase {
    /// Creates a new ResolveItemsUseCase backed by the given catalog
    pub fn new(catalog: Arc<dyn ICatalogStore + Send + Sync>) -> Self {
        Self { catalog }
    }

    /// Resolves `request` into target items
    ///
    /// - `All`: one target per complete catalog record, in store order. The
    ///   sectionless pseudo-record and incomplete records are skipped.
    /// - `Single`: exactly one target, or none if any field is empty.
    ///
    /// An empty result is not an error; the run that follows simply matches
    /// nothing.
    pub fn execute(&self, request: &SyncRequest) -> Vec<TargetItem> {
        match request {
            SyncRequest::All => self.resolve_all(),
            SyncRequest::Single(item) => {
                if !item.is_complete() {
                    warn!(md5 = %item.md5, "Single-item request has empty fields, nothing to sync");
                    return Vec::new();
                }
                vec![TargetItem::derive(
                    &item.md5,
                    &item.header_name,
                    &item.good_name,
                    item.region,
                )]
            }
        }
    }

    fn resolve_all(&self) -> Vec<TargetItem> {
        let mut targets = Vec::new();

        for entry in self.catalog.entries() {
            if entry.is_sectionless() {
                continue;
            }
            match entry.complete_fields() {
                Some(fields) => targets.push(TargetItem::from_catalog(&fields)),
                None => {
                    warn!(md5 = %entry.md5, "Skipping incomplete catalog record");
                }
            }
        }

        debug!(count = targets.len(), "Resolved catalog into target items");
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogEntry, RegionCode, SingleItem, SECTIONLESS_KEY};

    /// Catalog kept in insertion order
    struct VecCatalog(Vec<CatalogEntry>);

    impl ICatalogStore for VecCatalog {
        fn entries(&self) -> Vec<CatalogEntry> {
            self.0.clone()
        }

        fn lookup(&self, md5: &str) -> Option<CatalogEntry> {
            self.0.iter().find(|e| e.md5 == md5).cloned()
        }
    }

    fn use_case(entries: Vec<CatalogEntry>) -> ResolveItemsUseCase {
        ResolveItemsUseCase::new(Arc::new(VecCatalog(entries)))
    }

    fn single(md5: &str, crc: &str, header: &str, good: &str) -> SyncRequest {
        SyncRequest::Single(SingleItem {
            md5: md5.into(),
            crc: crc.into(),
            header_name: header.into(),
            good_name: good.into(),
            region: RegionCode::new(0x45),
        })
    }

    #[test]
    fn all_skips_incomplete_records() {
        let mut incomplete = CatalogEntry::new("id2", "c2", "HDR2", "Game 2", "69");
        incomplete.good_name = None;

        let uc = use_case(vec![
            CatalogEntry::new("id1", "c1", "HDR1", "Game 1", "69"),
            incomplete,
        ]);

        let targets = uc.execute(&SyncRequest::All);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].primary_dir_name(), "HDR1 (U) id1");
        assert_eq!(targets[0].display_name(), "Game 1");
    }

    #[test]
    fn all_keeps_record_with_negative_region_code() {
        let uc = use_case(vec![CatalogEntry::new("id1", "c1", "HDR1", "Game 1", "-1")]);

        let targets = uc.execute(&SyncRequest::All);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].primary_dir_name(), "HDR1 (Unk) id1");
    }

    #[test]
    fn all_preserves_store_order() {
        let uc = use_case(vec![
            CatalogEntry::new("b", "c", "B", "Bravo", "74"),
            CatalogEntry::new("a", "c", "A", "Alpha", "74"),
            CatalogEntry::new("c", "c", "C", "Charlie", "74"),
        ]);

        let names: Vec<_> = uc
            .execute(&SyncRequest::All)
            .iter()
            .map(|t| t.display_name().to_string())
            .collect();
        assert_eq!(names, vec!["Bravo", "Alpha", "Charlie"]);
    }

    #[test]
    fn all_excludes_sectionless_record() {
        let uc = use_case(vec![
            CatalogEntry::new(SECTIONLESS_KEY, "c", "H", "G", "69"),
            CatalogEntry::new("id1", "c1", "HDR1", "Game 1", "69"),
        ]);
        assert_eq!(uc.execute(&SyncRequest::All).len(), 1);
    }

    #[test]
    fn all_with_empty_catalog_is_empty() {
        assert!(use_case(vec![]).execute(&SyncRequest::All).is_empty());
    }

    #[test]
    fn single_resolves_one_target_with_both_layouts() {
        let uc = use_case(vec![]);
        let targets = uc.execute(&single("abc", "1234", "SUPER GAME", "Super Game (U)"));
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].primary_dir_name(), "SUPER GAME (U) abc");
        assert_eq!(targets[0].alternate_dir_name(), "Super Game (U) (U) abc");
        assert_eq!(targets[0].header_name(), "SUPER GAME");
    }

    #[test]
    fn single_with_any_empty_field_is_empty() {
        let uc = use_case(vec![]);
        assert!(uc.execute(&single("", "1234", "HDR", "Good")).is_empty());
        assert!(uc.execute(&single("abc", "", "HDR", "Good")).is_empty());
        assert!(uc.execute(&single("abc", "1234", "", "Good")).is_empty());
        assert!(uc.execute(&single("abc", "1234", "HDR", "")).is_empty());
    }
}
