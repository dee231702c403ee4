//! # vnaddr - Vietnamese Address Reconciliation
//!
//! Reconcile free-text Vietnamese addresses against the province → district →
//! ward hierarchy: decompose an existing string into selections, and rebuild
//! the canonical string as selections change.
//!
//! ## Features
//!
//! - Decompose free text into province, district, ward and street-level detail
//! - Reassemble a canonical address string from selections
//! - [`AddressSelector`]: an I/O-free state machine for cascading pickers,
//!   with per-level loading states, cascading clears and stale-response
//!   filtering
//! - [`AddressForm`]: an async driver wiring the machine to any
//!   [`RegionSource`] and a change callback
//! - Bundled reference data served offline by [`StaticSource`]
//!
//! ## Quick start
//!
//! ```rust
//! // one-shot decomposition against the bundled data
//! let addr = vnaddr::parse("33 Trần Phú, Phường Điện Biên, Quận Ba Đình, Thành phố Hà Nội");
//! assert_eq!(addr.province.unwrap().name, "Thành phố Hà Nội");
//! assert_eq!(addr.district.unwrap().name, "Quận Ba Đình");
//! assert_eq!(addr.ward.unwrap().name, "Phường Điện Biên");
//! assert_eq!(addr.detail, "33 Trần Phú");
//!
//! // forward assembly
//! let full = vnaddr::assemble("33 Trần Phú", "Phường Điện Biên", "Quận Ba Đình", "Thành phố Hà Nội");
//! assert_eq!(full, "33 Trần Phú, Phường Điện Biên, Quận Ba Đình, Thành phố Hà Nội");
//! ```
//!
//! Matching is substring containment with a first-match-in-list-order
//! tie-break; see [`parser`] for the documented limitation around names that
//! contain other names.

pub mod data;
mod error;
mod form;
pub mod parser;
mod region;
mod selector;
mod source;

pub use error::SourceError;
pub use form::AddressForm;
pub use region::{assemble, Level, ResolvedAddress, Unit};
pub use selector::{AddressSelector, Effect, FetchOutcome, FetchRequest, LevelState, ParsePhase};
pub use source::{RegionSource, StaticSource};

use data::embedded_index;

/// Convenience: decompose an address against the bundled reference data
///
/// ```rust
/// let addr = vnaddr::parse("Phường Lộc Thọ, Thành phố Nha Trang, Tỉnh Khánh Hòa");
/// assert!(addr.is_complete());
/// ```
pub fn parse(address: &str) -> ResolvedAddress {
    parser::decompose(address, embedded_index())
}

/// Convenience: decompose many addresses against the bundled reference data
pub fn parse_batch(addresses: &[&str]) -> Vec<ResolvedAddress> {
    addresses.iter().map(|a| parse(a)).collect()
}

/// Whether the text resolves far enough to route a delivery (at least a
/// province and district)
pub fn is_deliverable(address: &str) -> bool {
    let addr = parse(address);
    addr.has_province() && addr.has_district()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_address() {
        let addr = parse("33 Trần Phú, Phường Điện Biên, Quận Ba Đình, Thành phố Hà Nội");

        assert_eq!(addr.province.as_ref().unwrap().id, "01");
        assert_eq!(addr.district.as_ref().unwrap().id, "001");
        assert_eq!(addr.ward.as_ref().unwrap().id, "00025");
        assert_eq!(addr.detail, "33 Trần Phú");
    }

    #[test]
    fn test_parse_partial_address() {
        let addr = parse("khu du lịch Bãi Cháy, Tỉnh Quảng Ninh");

        assert_eq!(addr.province.as_ref().unwrap().id, "22");
        assert!(addr.district.is_none());
        assert!(addr.ward.is_none());
    }

    #[test]
    fn test_parse_batch() {
        let results = parse_batch(&[
            "Phường Bến Nghé, Quận 1, Thành phố Hồ Chí Minh",
            "Phường Mỹ An, Quận Ngũ Hành Sơn, Thành phố Đà Nẵng",
            "somewhere unknown",
        ]);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_complete());
        assert!(results[1].is_complete());
        assert!(!results[2].has_province());
    }

    #[test]
    fn test_is_deliverable() {
        assert!(is_deliverable(
            "12 Hùng Vương, Phường Cam Nghĩa, Thành phố Cam Ranh, Tỉnh Khánh Hòa"
        ));
        assert!(!is_deliverable("Tỉnh Khánh Hòa"));
        assert!(!is_deliverable(""));
    }
}
