//! Embedded administrative unit data and index construction

use crate::region::Unit;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Bundled province/district/ward reference data (compiled in)
const UNIT_DATA: &str = include_str!("../data/units.csv");

/// Shared index over the bundled data
static EMBEDDED_INDEX: Lazy<UnitIndex> = Lazy::new(|| UnitIndex::build(&load_units()));

/// One row of the reference data: a ward together with its ancestors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRow {
    pub province: Unit,
    pub district: Unit,
    pub ward: Unit,
}

impl UnitRow {
    /// Create a row from `(id, name)` pairs, top level first
    pub fn new(
        province: (impl Into<String>, impl Into<String>),
        district: (impl Into<String>, impl Into<String>),
        ward: (impl Into<String>, impl Into<String>),
    ) -> Self {
        Self {
            province: Unit::new(province.0, province.1),
            district: Unit::new(district.0, district.1),
            ward: Unit::new(ward.0, ward.1),
        }
    }
}

/// Parse the bundled CSV data
pub fn load_units() -> Vec<UnitRow> {
    let mut rows = Vec::new();

    for line in UNIT_DATA.lines().skip(1) {
        // skip header
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < 6 {
            continue;
        }
        let field = |i: usize| parts[i].trim().to_string();
        if parts.iter().any(|p| p.trim().is_empty()) {
            continue;
        }
        rows.push(UnitRow {
            province: Unit::new(field(0), field(1)),
            district: Unit::new(field(2), field(3)),
            ward: Unit::new(field(4), field(5)),
        });
    }

    rows
}

/// Hierarchical index over a set of unit rows.
///
/// List order follows first appearance in the source data; the matcher relies
/// on that order for its first-match tie-break, so it is preserved here
/// rather than sorted.
#[derive(Debug, Clone, Default)]
pub struct UnitIndex {
    /// All provinces, in source order
    pub provinces: Vec<Unit>,
    /// Province id -> districts, in source order
    pub districts_by_province: HashMap<String, Vec<Unit>>,
    /// District id -> wards, in source order
    pub wards_by_district: HashMap<String, Vec<Unit>>,
}

impl UnitIndex {
    /// Build an index from unit rows, deduplicating by id
    pub fn build(rows: &[UnitRow]) -> Self {
        let mut index = UnitIndex::default();

        for row in rows {
            if !index.provinces.iter().any(|p| p.id == row.province.id) {
                index.provinces.push(row.province.clone());
            }

            let districts = index
                .districts_by_province
                .entry(row.province.id.clone())
                .or_default();
            if !districts.iter().any(|d| d.id == row.district.id) {
                districts.push(row.district.clone());
            }

            let wards = index
                .wards_by_district
                .entry(row.district.id.clone())
                .or_default();
            if !wards.iter().any(|w| w.id == row.ward.id) {
                wards.push(row.ward.clone());
            }
        }

        index
    }

    /// All provinces
    pub fn provinces(&self) -> &[Unit] {
        &self.provinces
    }

    /// Districts belonging to a province (empty slice if unknown)
    pub fn districts_of(&self, province_id: &str) -> &[Unit] {
        self.districts_by_province
            .get(province_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Wards belonging to a district (empty slice if unknown)
    pub fn wards_of(&self, district_id: &str) -> &[Unit] {
        self.wards_by_district
            .get(district_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Index over the bundled reference data, built once per process
pub fn embedded_index() -> &'static UnitIndex {
    &EMBEDDED_INDEX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_units() {
        let rows = load_units();
        assert!(!rows.is_empty());
        assert!(rows
            .iter()
            .any(|r| r.province.name == "Thành phố Hà Nội" && r.ward.name == "Phường Điện Biên"));
    }

    #[test]
    fn test_index_structure() {
        let index = embedded_index();

        assert!(index.provinces().iter().any(|p| p.id == "01"));
        assert!(index.provinces().iter().any(|p| p.id == "79"));

        let hanoi_districts = index.districts_of("01");
        assert!(hanoi_districts.iter().any(|d| d.name == "Quận Ba Đình"));

        let ba_dinh_wards = index.wards_of("001");
        assert!(ba_dinh_wards.iter().any(|w| w.name == "Phường Trúc Bạch"));
    }

    #[test]
    fn test_index_unknown_parent_is_empty() {
        let index = embedded_index();
        assert!(index.districts_of("99").is_empty());
        assert!(index.wards_of("999").is_empty());
    }

    #[test]
    fn test_index_preserves_source_order() {
        let rows = vec![
            UnitRow::new(("p1", "B Province"), ("d1", "D1"), ("w1", "W1")),
            UnitRow::new(("p2", "A Province"), ("d2", "D2"), ("w2", "W2")),
            UnitRow::new(("p1", "B Province"), ("d1", "D1"), ("w3", "W3")),
        ];
        let index = UnitIndex::build(&rows);

        // source order, not alphabetical, and no duplicates
        let names: Vec<&str> = index.provinces().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B Province", "A Province"]);
        assert_eq!(index.wards_of("d1").len(), 2);
    }
}
