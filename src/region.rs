//! Administrative unit data structures

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single administrative unit at any level of the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unit {
    /// Official administrative code (e.g. "01" for Hà Nội)
    pub id: String,
    /// Full display name, including the unit-type prefix
    /// (e.g. "Thành phố Hà Nội", "Quận Ba Đình", "Phường Điện Biên")
    pub name: String,
}

impl Unit {
    /// Create a new unit
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Hierarchy level of an administrative unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    Province,
    District,
    Ward,
}

impl Level {
    /// The level below this one, if any
    pub fn child(self) -> Option<Level> {
        match self {
            Level::Province => Some(Level::District),
            Level::District => Some(Level::Ward),
            Level::Ward => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Level::Province => "province",
            Level::District => "district",
            Level::Ward => "ward",
        };
        f.write_str(s)
    }
}

/// Assemble the canonical address string from its parts.
///
/// Parts are ordered detail-first (Vietnamese convention), empty parts are
/// skipped, and the remainder is joined with `", "`. Calling this repeatedly
/// with the same inputs always yields the same output.
pub fn assemble(detail: &str, ward: &str, district: &str, province: &str) -> String {
    [detail, ward, district, province]
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result of decomposing a free-text address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolvedAddress {
    /// Matched province, if any
    pub province: Option<Unit>,
    /// Matched district, if any
    pub district: Option<Unit>,
    /// Matched ward, if any
    pub ward: Option<Unit>,
    /// Remaining street-level text (house number, street name)
    pub detail: String,
}

impl ResolvedAddress {
    /// Create an empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Did decomposition reach the province level?
    pub fn has_province(&self) -> bool {
        self.province.is_some()
    }

    /// Did decomposition reach the district level?
    pub fn has_district(&self) -> bool {
        self.district.is_some()
    }

    /// Did decomposition reach the ward level?
    pub fn has_ward(&self) -> bool {
        self.ward.is_some()
    }

    /// All three levels resolved
    pub fn is_complete(&self) -> bool {
        self.province.is_some() && self.district.is_some() && self.ward.is_some()
    }

    /// The canonical full address string for this resolution
    pub fn canonical(&self) -> String {
        fn name(u: &Option<Unit>) -> &str {
            u.as_ref().map(|u| u.name.as_str()).unwrap_or("")
        }
        assemble(
            &self.detail,
            name(&self.ward),
            name(&self.district),
            name(&self.province),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_full() {
        let s = assemble(
            "33 Trần Phú",
            "Phường Điện Biên",
            "Quận Ba Đình",
            "Thành phố Hà Nội",
        );
        assert_eq!(
            s,
            "33 Trần Phú, Phường Điện Biên, Quận Ba Đình, Thành phố Hà Nội"
        );
    }

    #[test]
    fn test_assemble_skips_empty_parts() {
        assert_eq!(
            assemble("", "", "Quận Ba Đình", "Thành phố Hà Nội"),
            "Quận Ba Đình, Thành phố Hà Nội"
        );
        assert_eq!(assemble("", "", "", "Thành phố Hà Nội"), "Thành phố Hà Nội");
        assert_eq!(assemble("", "", "", ""), "");
    }

    #[test]
    fn test_assemble_idempotent() {
        let first = assemble("12 Main St", "WardX", "DistrictY", "ProvinceZ");
        for _ in 0..3 {
            assert_eq!(
                assemble("12 Main St", "WardX", "DistrictY", "ProvinceZ"),
                first
            );
        }
    }

    #[test]
    fn test_resolved_address_canonical() {
        let addr = ResolvedAddress {
            province: Some(Unit::new("01", "Thành phố Hà Nội")),
            district: Some(Unit::new("001", "Quận Ba Đình")),
            ward: Some(Unit::new("00025", "Phường Điện Biên")),
            detail: "33 Trần Phú".to_string(),
        };
        assert!(addr.is_complete());
        assert_eq!(
            addr.canonical(),
            "33 Trần Phú, Phường Điện Biên, Quận Ba Đình, Thành phố Hà Nội"
        );
    }

    #[test]
    fn test_partial_resolution() {
        let addr = ResolvedAddress {
            province: Some(Unit::new("48", "Thành phố Đà Nẵng")),
            ..Default::default()
        };
        assert!(addr.has_province());
        assert!(!addr.is_complete());
        assert_eq!(addr.canonical(), "Thành phố Đà Nẵng");
    }

    #[test]
    fn test_level_child() {
        assert_eq!(Level::Province.child(), Some(Level::District));
        assert_eq!(Level::District.child(), Some(Level::Ward));
        assert_eq!(Level::Ward.child(), None);
    }
}
