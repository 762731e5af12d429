//! Fixed list of coastal countries where STS transfers are arranged.
//!
//! The wizard's basic-info step only accepts locations from this list.
//! The list is an allow-list agreed with the backend; matching is exact
//! and case-sensitive, the same form the location dropdown submits.

/// Coastal countries accepted as an operation location.
pub const COASTAL_COUNTRIES: &[&str] = &[
    "Argentina",
    "Australia",
    "Bahamas",
    "Belgium",
    "Brazil",
    "Denmark",
    "Gibraltar",
    "Greece",
    "India",
    "Indonesia",
    "Malaysia",
    "Malta",
    "Netherlands",
    "Nigeria",
    "Norway",
    "Oman",
    "Panama",
    "Singapore",
    "South Africa",
    "Spain",
    "United Arab Emirates",
    "United Kingdom",
    "United States",
    "Uruguay",
];

/// Returns `true` if the location is a member of the fixed coastal list.
pub fn is_coastal_country(location: &str) -> bool {
    COASTAL_COUNTRIES.contains(&location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_locations_are_accepted() {
        assert!(is_coastal_country("Singapore"));
        assert!(is_coastal_country("Gibraltar"));
        assert!(is_coastal_country("United Arab Emirates"));
    }

    #[test]
    fn unknown_locations_are_rejected() {
        assert!(!is_coastal_country("Nowhereland"));
        assert!(!is_coastal_country(""));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!is_coastal_country("singapore"));
        assert!(!is_coastal_country("SINGAPORE"));
    }

    #[test]
    fn list_is_sorted_and_unique() {
        let mut sorted = COASTAL_COUNTRIES.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, COASTAL_COUNTRIES);
    }
}
