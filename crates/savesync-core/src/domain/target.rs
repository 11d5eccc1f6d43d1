//! Target items and remote name matching
//!
//! A [`TargetItem`] is one local item selected for synchronization. It
//! carries both historically valid directory names for the item's data plus
//! the display and header names, which remote entries may use as a prefix.
//!
//! ## Match rules
//!
//! A remote entry name matches a target when any of the following holds,
//! evaluated in this order:
//!
//! 1. it equals the primary directory name
//! 2. it equals the alternate directory name
//! 3. it starts with the display name
//! 4. it starts with the header name
//!
//! Comparisons are case-sensitive and apply no normalization.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::catalog::CompleteFields;
use super::region::RegionCode;

/// Characters that cannot appear in a directory name on common filesystems
const RESERVED_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

// ============================================================================
// Naming layouts
// ============================================================================

/// The two directory-naming conventions item data may be stored under
///
/// Data written by older releases uses the header layout; newer releases
/// name the directory after the display name. Both stay recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingLayout {
    /// `"{header} {region} {md5}"`
    Header,
    /// `"{display} {region} {md5}"` with reserved characters replaced by `_`
    DisplayName,
}

impl NamingLayout {
    /// Builds the directory name for an item under this layout
    pub fn dir_name(
        &self,
        md5: &str,
        header_name: &str,
        good_name: &str,
        region: RegionCode,
    ) -> String {
        match self {
            NamingLayout::Header => format!("{} {} {}", header_name, region.symbol(), md5),
            NamingLayout::DisplayName => {
                format!("{} {} {}", sanitize(good_name), region.symbol(), md5)
            }
        }
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if RESERVED_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

// ============================================================================
// MatchRule
// ============================================================================

/// Which rule matched a remote entry name to a target item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Exact match on the primary directory name
    PrimaryDir,
    /// Exact match on the alternate directory name
    AlternateDir,
    /// Entry name starts with the display name
    DisplayPrefix,
    /// Entry name starts with the header name
    HeaderPrefix,
}

impl Display for MatchRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchRule::PrimaryDir => "primary_dir",
            MatchRule::AlternateDir => "alternate_dir",
            MatchRule::DisplayPrefix => "display_prefix",
            MatchRule::HeaderPrefix => "header_prefix",
        };
        write!(f, "{}", s)
    }
}

// ============================================================================
// TargetItem
// ============================================================================

/// One item being synchronized in the current run
///
/// Derived once per run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetItem {
    primary_dir_name: String,
    alternate_dir_name: String,
    display_name: String,
    header_name: String,
}

impl TargetItem {
    /// Creates a target from explicit names
    pub fn new(
        primary_dir_name: impl Into<String>,
        alternate_dir_name: impl Into<String>,
        display_name: impl Into<String>,
        header_name: impl Into<String>,
    ) -> Self {
        Self {
            primary_dir_name: primary_dir_name.into(),
            alternate_dir_name: alternate_dir_name.into(),
            display_name: display_name.into(),
            header_name: header_name.into(),
        }
    }

    /// Derives a target from item identity, applying both naming layouts
    pub fn derive(md5: &str, header_name: &str, good_name: &str, region: RegionCode) -> Self {
        Self::new(
            NamingLayout::Header.dir_name(md5, header_name, good_name, region),
            NamingLayout::DisplayName.dir_name(md5, header_name, good_name, region),
            good_name,
            header_name,
        )
    }

    /// Derives a target from a complete catalog record
    pub fn from_catalog(fields: &CompleteFields<'_>) -> Self {
        Self::derive(
            fields.md5,
            fields.header_name,
            fields.good_name,
            fields.region,
        )
    }

    pub fn primary_dir_name(&self) -> &str {
        &self.primary_dir_name
    }

    pub fn alternate_dir_name(&self) -> &str {
        &self.alternate_dir_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Returns the first rule under which `remote_name` matches this item
    pub fn matched_rule(&self, remote_name: &str) -> Option<MatchRule> {
        if remote_name == self.primary_dir_name {
            Some(MatchRule::PrimaryDir)
        } else if remote_name == self.alternate_dir_name {
            Some(MatchRule::AlternateDir)
        } else if remote_name.starts_with(self.display_name.as_str()) {
            Some(MatchRule::DisplayPrefix)
        } else if remote_name.starts_with(self.header_name.as_str()) {
            Some(MatchRule::HeaderPrefix)
        } else {
            None
        }
    }

    /// Returns true if `remote_name` corresponds to this item
    pub fn is_match(&self, remote_name: &str) -> bool {
        self.matched_rule(remote_name).is_some()
    }
}

/// Returns true if any target matches `remote_name`
pub fn contains_match(targets: &[TargetItem], remote_name: &str) -> bool {
    targets.iter().any(|t| t.is_match(remote_name))
}

/// Returns the first matching target and the rule that matched
pub fn first_match<'a>(
    targets: &'a [TargetItem],
    remote_name: &str,
) -> Option<(&'a TargetItem, MatchRule)> {
    targets
        .iter()
        .find_map(|t| t.matched_rule(remote_name).map(|rule| (t, rule)))
}
