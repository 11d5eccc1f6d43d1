//! Region codes
//!
//! A catalog entry carries the one-byte region code read from the ROM
//! header. Directory names embed the short region tag derived from it.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// One-byte region code of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionCode(u8);

impl RegionCode {
    /// Wrap a raw region byte
    #[must_use]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Raw region byte
    #[must_use]
    pub const fn code(&self) -> u8 {
        self.0
    }

    /// Short region tag used in directory names, e.g. `(U)` for USA
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self.0 {
            0x00 => "(Demo)",
            0x07 => "(Beta)",
            0x41 => "(JU)",
            0x44 => "(G)",
            0x45 => "(U)",
            0x46 => "(F)",
            0x49 => "(I)",
            0x4A => "(J)",
            0x53 => "(S)",
            0x55 | 0x59 => "(A)",
            0x20 | 0x21 | 0x38 | 0x50 | 0x58 | 0x70 => "(E)",
            _ => "(Unk)",
        }
    }
}

impl Display for RegionCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl From<u8> for RegionCode {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

/// Parses the decimal text stored in catalog records
///
/// Catalog files store the header byte as a signed value (-128..=127), so
/// negative text is read back as its two's complement byte.
impl FromStr for RegionCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i8>()
            .map(|code| Self(code as u8))
            .map_err(|_| DomainError::InvalidRegionCode(s.to_string()))
    }
}
