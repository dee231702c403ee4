//! Free-text address decomposition
//!
//! Matching is substring containment of a unit's full name inside the
//! original address string, with ties broken by list order: the first unit
//! whose name occurs anywhere in the text wins. This mirrors the upstream
//! contract and is a known limitation — when one unit's name is a substring
//! of another's (e.g. "Quận 1" inside "Quận 12"), the earlier-listed unit is
//! selected even if the longer name was intended. Disambiguation policy is an
//! open question for the reference-data owner; it is deliberately not
//! second-guessed here.

use crate::data::UnitIndex;
use crate::region::{ResolvedAddress, Unit};

/// Minimum detail length accepted by the extraction guard, in characters
const MIN_DETAIL_CHARS: usize = 3;

/// Find the first unit (in list order) whose full name occurs in the text
pub fn first_match<'a>(units: &'a [Unit], text: &str) -> Option<&'a Unit> {
    units.iter().find(|u| text.contains(u.name.as_str()))
}

/// Remove every occurrence of each name from the text, then tidy separators.
///
/// Removal is literal and case-sensitive. Place names can contain characters
/// like "." or "(", so this is done with plain substring replacement rather
/// than a pattern engine — there is nothing to escape.
pub fn strip_names(text: &str, names: &[&str]) -> String {
    let mut remaining = text.to_string();
    for name in names {
        if !name.is_empty() {
            remaining = remaining.replace(name, "");
        }
    }
    tidy_separators(&remaining)
}

/// Trim leading/trailing commas and whitespace and collapse runs of commas
/// left behind by name removal
pub fn tidy_separators(text: &str) -> String {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Apply the detail acceptance guard to a stripped remainder.
///
/// Returns the remainder only if it is non-empty, longer than two characters,
/// and different from the current detail value. Anything else is dropped so
/// the caller neither stores separator junk nor triggers a redundant update.
pub fn accept_detail(candidate: &str, current: &str) -> Option<String> {
    let candidate = tidy_separators(candidate);
    if candidate.chars().count() < MIN_DETAIL_CHARS || candidate == current {
        return None;
    }
    Some(candidate)
}

/// Decompose a free-text address against a fully-loaded index.
///
/// Matching proceeds top-down: province first, then districts of that
/// province, then wards of that district. A miss at any level halts there
/// with descendants unresolved; that is a normal outcome, not an error. The
/// street-level detail is only derived once all three levels resolve — for a
/// partial resolution the original string remains the caller's source of
/// truth and `detail` stays empty.
///
/// ```rust
/// let addr = vnaddr::parse("33 Trần Phú, Phường Điện Biên, Quận Ba Đình, Thành phố Hà Nội");
/// assert!(addr.is_complete());
/// assert_eq!(addr.detail, "33 Trần Phú");
/// ```
pub fn decompose(address: &str, index: &UnitIndex) -> ResolvedAddress {
    let address = address.trim();
    if address.is_empty() {
        return ResolvedAddress::empty();
    }

    let mut result = ResolvedAddress::default();

    let Some(province) = first_match(index.provinces(), address) else {
        return result;
    };
    result.province = Some(province.clone());

    let Some(district) = first_match(index.districts_of(&province.id), address) else {
        return result;
    };
    result.district = Some(district.clone());

    let Some(ward) = first_match(index.wards_of(&district.id), address) else {
        return result;
    };
    result.ward = Some(ward.clone());

    let stripped = strip_names(address, &[&province.name, &district.name, &ward.name]);
    if let Some(detail) = accept_detail(&stripped, "") {
        result.detail = detail;
    }

    result
}
