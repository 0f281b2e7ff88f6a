//! Backend selection and catalog policy enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which file format backs the catalog.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Delimited text with a header row.
    #[default]
    Csv,
    /// Single JSON document keyed by title.
    Json,
}

impl BackendKind {
    pub const ALL_VARIANTS_STR: &'static str = "csv|json";

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Duplicate policy a backend applies when nothing is configured.
    ///
    /// The two formats historically disagree, so the default is per backend.
    #[must_use]
    pub const fn default_duplicate_policy(&self) -> DuplicatePolicy {
        match *self {
            Self::Csv => DuplicatePolicy::Reject,
            Self::Json => DuplicatePolicy::Upsert,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(CoreError::InvalidBackend(other.to_owned())),
        }
    }
}

/// What `add` does when a record with the same identity already exists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Leave the catalog untouched and report `false`. Identity is the title
    /// or, when both records carry one, the external id.
    Reject,
    /// Overwrite the record stored under the same title.
    Upsert,
}

impl DuplicatePolicy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Reject => "reject",
            Self::Upsert => "upsert",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "upsert" => Ok(Self::Upsert),
            other => Err(CoreError::InvalidDuplicatePolicy(other.to_owned())),
        }
    }
}

/// Direction for rating sorts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "asc" | "ascending" => Ok(Self::Ascending),
            "d" | "desc" | "descending" => Ok(Self::Descending),
            other => Err(CoreError::InvalidSortOrder(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("CSV".parse::<BackendKind>().unwrap(), BackendKind::Csv);
        assert_eq!(" json ".parse::<BackendKind>().unwrap(), BackendKind::Json);
        assert!(matches!("xml".parse::<BackendKind>(), Err(CoreError::InvalidBackend(s)) if s == "xml"));
    }

    #[test]
    fn test_default_policies_diverge() {
        assert_eq!(BackendKind::Csv.default_duplicate_policy(), DuplicatePolicy::Reject);
        assert_eq!(BackendKind::Json.default_duplicate_policy(), DuplicatePolicy::Upsert);
    }

    #[test]
    fn test_duplicate_policy_roundtrip_str() {
        for policy in [DuplicatePolicy::Reject, DuplicatePolicy::Upsert] {
            assert_eq!(policy.as_str().parse::<DuplicatePolicy>().unwrap(), policy);
        }
        assert!("merge".parse::<DuplicatePolicy>().is_err());
    }

    #[test]
    fn test_sort_order_accepts_menu_letters() {
        assert_eq!("a".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert!("x".parse::<SortOrder>().is_err());
    }
}
