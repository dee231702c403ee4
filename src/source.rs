//! Region data sources
//!
//! The selector machine is fed by anything implementing [`RegionSource`]; the
//! implementation over a real backend lives with whoever owns that backend.
//! [`StaticSource`] serves the bundled reference data (or a caller-supplied
//! index) and is what the convenience functions and most tests use.

use crate::data::{embedded_index, UnitIndex};
use crate::error::SourceError;
use crate::region::Unit;
use async_trait::async_trait;

/// Query side of the address hierarchy.
///
/// Every method returns the full option list for one level, ordered the way
/// the backend orders it — the matcher's first-match tie-break depends on
/// that order. An unknown or childless parent yields `Ok` with an empty list;
/// `Err` is reserved for transport and payload failures.
#[async_trait]
pub trait RegionSource: Send + Sync {
    /// All provinces
    async fn provinces(&self) -> Result<Vec<Unit>, SourceError>;

    /// Districts of one province
    async fn districts(&self, province_id: &str) -> Result<Vec<Unit>, SourceError>;

    /// Wards of one district
    async fn wards(&self, district_id: &str) -> Result<Vec<Unit>, SourceError>;
}

/// A source backed by an in-memory [`UnitIndex`]
#[derive(Debug, Clone)]
pub struct StaticSource {
    index: UnitIndex,
}

impl StaticSource {
    /// Source over the bundled reference data
    pub fn embedded() -> Self {
        Self {
            index: embedded_index().clone(),
        }
    }

    /// Source over a caller-supplied index
    pub fn new(index: UnitIndex) -> Self {
        Self { index }
    }

    /// The underlying index
    pub fn index(&self) -> &UnitIndex {
        &self.index
    }
}

#[async_trait]
impl RegionSource for StaticSource {
    async fn provinces(&self) -> Result<Vec<Unit>, SourceError> {
        Ok(self.index.provinces().to_vec())
    }

    async fn districts(&self, province_id: &str) -> Result<Vec<Unit>, SourceError> {
        Ok(self.index.districts_of(province_id).to_vec())
    }

    async fn wards(&self, district_id: &str) -> Result<Vec<Unit>, SourceError> {
        Ok(self.index.wards_of(district_id).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_source_levels() {
        let source = StaticSource::embedded();

        let provinces = source.provinces().await.unwrap();
        assert!(provinces.iter().any(|p| p.name == "Thành phố Hồ Chí Minh"));

        let districts = source.districts("79").await.unwrap();
        assert!(districts.iter().any(|d| d.name == "Thành phố Thủ Đức"));

        let wards = source.wards("769").await.unwrap();
        assert!(wards.iter().any(|w| w.name == "Phường Linh Xuân"));
    }

    #[tokio::test]
    async fn test_unknown_parent_is_ok_and_empty() {
        let source = StaticSource::embedded();
        assert!(source.districts("no-such-id").await.unwrap().is_empty());
        assert!(source.wards("no-such-id").await.unwrap().is_empty());
    }
}
