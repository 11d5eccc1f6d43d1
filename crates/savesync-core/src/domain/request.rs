//! Synchronization requests
//!
//! A request asks for either one named item or the whole catalog. The two
//! shapes are distinct variants; [`SyncRequest::from_parts`] builds one from
//! the optional fields a caller collected and rejects any mixture.

use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::region::RegionCode;

/// Identity of a single item to synchronize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleItem {
    pub md5: String,
    pub crc: String,
    pub header_name: String,
    pub good_name: String,
    pub region: RegionCode,
}

impl SingleItem {
    /// Returns true if every text field is non-empty
    pub fn is_complete(&self) -> bool {
        [&self.md5, &self.crc, &self.header_name, &self.good_name]
            .iter()
            .all(|f| !f.trim().is_empty())
    }
}

/// What a synchronization run should cover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SyncRequest {
    /// Synchronize one item
    Single(SingleItem),
    /// Synchronize every complete item in the catalog
    All,
}

impl SyncRequest {
    /// Builds a request from optional boundary fields
    ///
    /// All five present gives [`SyncRequest::Single`], all five absent gives
    /// [`SyncRequest::All`]. Empty text counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::AmbiguousRequest`] when only some fields are set.
    pub fn from_parts(
        md5: Option<String>,
        crc: Option<String>,
        header_name: Option<String>,
        good_name: Option<String>,
        region: Option<RegionCode>,
    ) -> Result<Self, DomainError> {
        let md5 = md5.filter(|v| !v.is_empty());
        let crc = crc.filter(|v| !v.is_empty());
        let header_name = header_name.filter(|v| !v.is_empty());
        let good_name = good_name.filter(|v| !v.is_empty());

        match (md5, crc, header_name, good_name, region) {
            (Some(md5), Some(crc), Some(header_name), Some(good_name), Some(region)) => {
                Ok(SyncRequest::Single(SingleItem {
                    md5,
                    crc,
                    header_name,
                    good_name,
                    region,
                }))
            }
            (None, None, None, None, None) => Ok(SyncRequest::All),
            (md5, crc, header_name, good_name, region) => {
                let missing: Vec<&str> = [
                    ("md5", md5.is_none()),
                    ("crc", crc.is_none()),
                    ("header_name", header_name.is_none()),
                    ("good_name", good_name.is_none()),
                    ("region", region.is_none()),
                ]
                .iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| *name)
                .collect();
                Err(DomainError::AmbiguousRequest(format!(
                    "single-item request is missing: {}",
                    missing.join(", ")
                )))
            }
        }
    }

    /// Returns true for the whole-catalog request
    pub fn is_all(&self) -> bool {
        matches!(self, SyncRequest::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn all_fields_present_is_single() {
        let req = SyncRequest::from_parts(
            s("abc"),
            s("1234"),
            s("HDR"),
            s("Good"),
            Some(RegionCode::new(0x45)),
        )
        .unwrap();
        match req {
            SyncRequest::Single(item) => {
                assert_eq!(item.md5, "abc");
                assert!(item.is_complete());
            }
            SyncRequest::All => panic!("expected single"),
        }
    }

    #[test]
    fn no_fields_is_all() {
        let req = SyncRequest::from_parts(None, None, None, None, None).unwrap();
        assert!(req.is_all());
    }

    #[test]
    fn empty_text_counts_as_absent() {
        let req = SyncRequest::from_parts(s(""), s(""), None, s(""), None).unwrap();
        assert!(req.is_all());
    }

    #[test]
    fn mixed_fields_are_rejected() {
        let err = SyncRequest::from_parts(s("abc"), None, s("HDR"), None, None).unwrap_err();
        match err {
            DomainError::AmbiguousRequest(msg) => {
                assert!(msg.contains("crc"));
                assert!(msg.contains("good_name"));
                assert!(msg.contains("region"));
                assert!(!msg.contains("md5"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn region_alone_is_rejected() {
        assert!(
            SyncRequest::from_parts(None, None, None, None, Some(RegionCode::new(1))).is_err()
        );
    }

    #[test]
    fn single_with_blank_field_is_incomplete() {
        let item = SingleItem {
            md5: "abc".into(),
            crc: " ".into(),
            header_name: "HDR".into(),
            good_name: "Good".into(),
            region: RegionCode::new(0x45),
        };
        assert!(!item.is_complete());
    }
}
