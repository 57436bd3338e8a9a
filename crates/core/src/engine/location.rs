use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::supplier::Category;
use crate::engine::availability::Confidence;

/// Category-specific willingness-to-travel classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusTier {
    Exact,
    District,
    Wide,
    All,
}

impl RadiusTier {
    /// Service radius per supplier category. Venues are immovable,
    /// entertainers travel, everything else serves its district.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Venues => RadiusTier::Exact,
            Category::Entertainment => RadiusTier::Wide,
            _ => RadiusTier::District,
        }
    }

    fn accepts_unverified(&self) -> bool {
        matches!(self, RadiusTier::All | RadiusTier::Wide)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationReason {
    ExactMatch,
    SameArea,
    AdjacentArea,
    DescriptiveCoverage,
    DescriptiveDeprioritized,
    TargetNotPostcode,
    UnverifiedSupplierLocation,
    ExactTierOnly,
    OutOfRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationVerdict {
    pub served: bool,
    pub reason: LocationReason,
    pub confidence: Confidence,
}

impl LocationVerdict {
    fn served(reason: LocationReason, confidence: Confidence) -> Self {
        Self { served: true, reason, confidence }
    }

    fn rejected(reason: LocationReason) -> Self {
        Self { served: false, reason, confidence: Confidence::High }
    }
}

/// Seam for the geography logic so the adjacency table and phrase lists
/// are data, not inline logic, and synthetic geographies can stand in
/// during tests.
pub trait LocationClassifier: Send + Sync {
    fn evaluate(
        &self,
        supplier_location: &str,
        target_location: &str,
        tier: RadiusTier,
    ) -> LocationVerdict;

    fn nearby(&self, supplier_location: &str, target_location: &str, tier: RadiusTier) -> bool {
        self.evaluate(supplier_location, target_location, tier).served
    }
}

/// Non-postcode coverage phrases seen in real supplier listings.
const DESCRIPTIVE_PHRASES: &[&str] = &[
    "central london",
    "north london",
    "south london",
    "east london",
    "west london",
    "greater london",
    "london wide",
    "uk wide",
    "nationwide",
];

/// London-area adjacency. Lookup is symmetric (both directions are
/// consulted), so each edge is recorded once.
const LONDON_ADJACENCY: &[(&str, &[&str])] = &[
    ("SW", &["SE", "W", "TW", "CR", "SM"]),
    ("SE", &["E", "BR", "DA", "TN"]),
    ("E", &["N", "IG", "RM"]),
    ("N", &["NW", "EN"]),
    ("NW", &["W", "HA"]),
    ("W", &["TW", "UB"]),
    ("EC", &["WC", "E", "N", "SE"]),
    ("WC", &["W", "NW"]),
];

/// Regex-driven classifier over the UK postcode grammar plus a fixed
/// descriptive-phrase list and London-area adjacency table.
pub struct UkLocationClassifier {
    full_postcode: Regex,
    outward_postcode: Regex,
    area_only: Regex,
    embedded_postcode: Regex,
    descriptive_phrases: Vec<String>,
    adjacency: Vec<(String, Vec<String>)>,
}

impl UkLocationClassifier {
    pub fn new() -> Self {
        Self::with_geography(
            DESCRIPTIVE_PHRASES.iter().map(|phrase| (*phrase).to_owned()).collect(),
            LONDON_ADJACENCY
                .iter()
                .map(|(area, neighbours)| {
                    (
                        (*area).to_owned(),
                        neighbours.iter().map(|neighbour| (*neighbour).to_owned()).collect(),
                    )
                })
                .collect(),
        )
    }

    pub fn with_geography(
        descriptive_phrases: Vec<String>,
        adjacency: Vec<(String, Vec<String>)>,
    ) -> Self {
        Self {
            full_postcode: Regex::new(r"(?i)^[A-Z]{1,2}[0-9][0-9A-Z]?\s*[0-9][A-Z]{2}$")
                .expect("full postcode pattern"),
            outward_postcode: Regex::new(r"(?i)^[A-Z]{1,2}[0-9][0-9A-Z]?$")
                .expect("outward postcode pattern"),
            area_only: Regex::new(r"(?i)^[A-Z]{1,2}$").expect("area pattern"),
            embedded_postcode: Regex::new(
                r"(?i)\b[A-Z]{1,2}[0-9][0-9A-Z]?(?:\s*[0-9][A-Z]{2})?\b",
            )
            .expect("embedded postcode pattern"),
            descriptive_phrases,
            adjacency,
        }
    }

    /// Free-text venue addresses carry the postcode after a comma; pull
    /// it out when the pattern matches, otherwise keep the raw string.
    fn extract_postcode<'a>(&self, location: &'a str) -> std::borrow::Cow<'a, str> {
        let trimmed = location.trim();
        if !trimmed.contains(',') {
            return std::borrow::Cow::Borrowed(trimmed);
        }
        match self.embedded_postcode.find_iter(trimmed).last() {
            Some(found) => std::borrow::Cow::Owned(found.as_str().to_owned()),
            None => std::borrow::Cow::Borrowed(trimmed),
        }
    }

    fn is_descriptive(&self, location: &str) -> bool {
        let lowered = location.trim().to_ascii_lowercase();
        self.descriptive_phrases.iter().any(|phrase| lowered == *phrase)
            || lowered.starts_with("london")
            || lowered.ends_with("london")
    }

    fn is_valid_postcode(&self, location: &str) -> bool {
        let trimmed = location.trim();
        self.full_postcode.is_match(trimmed)
            || self.outward_postcode.is_match(trimmed)
            || self.area_only.is_match(trimmed)
    }

    /// Leading one or two letters of a postcode.
    fn postcode_area(&self, postcode: &str) -> String {
        postcode
            .trim()
            .chars()
            .take_while(|character| character.is_ascii_alphabetic())
            .take(2)
            .collect::<String>()
            .to_ascii_uppercase()
    }

    fn areas_adjacent(&self, left: &str, right: &str) -> bool {
        let forward = self.adjacency.iter().any(|(area, neighbours)| {
            area == left && neighbours.iter().any(|neighbour| neighbour == right)
        });
        let backward = self.adjacency.iter().any(|(area, neighbours)| {
            area == right && neighbours.iter().any(|neighbour| neighbour == left)
        });
        forward || backward
    }
}

impl Default for UkLocationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationClassifier for UkLocationClassifier {
    fn evaluate(
        &self,
        supplier_location: &str,
        target_location: &str,
        tier: RadiusTier,
    ) -> LocationVerdict {
        let supplier = self.extract_postcode(supplier_location);
        let target = self.extract_postcode(target_location);

        // Descriptive coverage claims only count for wide-radius tiers.
        if self.is_descriptive(&supplier) {
            return if tier.accepts_unverified() {
                LocationVerdict::served(LocationReason::DescriptiveCoverage, Confidence::Medium)
            } else {
                LocationVerdict::rejected(LocationReason::DescriptiveDeprioritized)
            };
        }

        // A target we cannot parse cannot be distance-checked; err
        // permissive rather than excluding the supplier.
        if !self.is_valid_postcode(&target) {
            return LocationVerdict::served(LocationReason::TargetNotPostcode, Confidence::Low);
        }

        if !self.is_valid_postcode(&supplier) {
            return if tier.accepts_unverified() {
                LocationVerdict::served(
                    LocationReason::UnverifiedSupplierLocation,
                    Confidence::Medium,
                )
            } else {
                LocationVerdict::rejected(LocationReason::UnverifiedSupplierLocation)
            };
        }

        let supplier_normalized: String =
            supplier.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_ascii_uppercase();
        let target_normalized: String =
            target.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_ascii_uppercase();

        if supplier_normalized == target_normalized {
            return LocationVerdict::served(LocationReason::ExactMatch, Confidence::High);
        }

        let supplier_area = self.postcode_area(&supplier);
        let target_area = self.postcode_area(&target);
        if supplier_area == target_area {
            return LocationVerdict::served(LocationReason::SameArea, Confidence::High);
        }

        if tier == RadiusTier::Exact {
            return LocationVerdict::rejected(LocationReason::ExactTierOnly);
        }

        if self.areas_adjacent(&supplier_area, &target_area) {
            return LocationVerdict::served(LocationReason::AdjacentArea, Confidence::High);
        }

        LocationVerdict::rejected(LocationReason::OutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> UkLocationClassifier {
        UkLocationClassifier::new()
    }

    #[test]
    fn exact_postcode_match_ignores_case_and_whitespace() {
        let verdict = classifier().evaluate("sw19 2ab", "SW192AB", RadiusTier::Exact);
        assert!(verdict.served);
        assert_eq!(verdict.reason, LocationReason::ExactMatch);
        assert_eq!(verdict.confidence, Confidence::High);
    }

    #[test]
    fn same_area_serves_even_on_exact_tier() {
        let verdict = classifier().evaluate("SW19", "SW4 7AA", RadiusTier::Exact);
        assert!(verdict.served);
        assert_eq!(verdict.reason, LocationReason::SameArea);
    }

    #[test]
    fn exact_tier_rejects_cross_area_before_adjacency() {
        let verdict = classifier().evaluate("SW19", "SE1 9SG", RadiusTier::Exact);
        assert!(!verdict.served);
        assert_eq!(verdict.reason, LocationReason::ExactTierOnly);
    }

    #[test]
    fn district_tier_reaches_adjacent_areas_only() {
        let classifier = classifier();
        let adjacent = classifier.evaluate("SW19", "SE1 9SG", RadiusTier::District);
        assert!(adjacent.served);
        assert_eq!(adjacent.reason, LocationReason::AdjacentArea);

        let distant = classifier.evaluate("SW19", "RM1 1AA", RadiusTier::District);
        assert!(!distant.served);
        assert_eq!(distant.reason, LocationReason::OutOfRange);
    }

    #[test]
    fn adjacency_lookup_is_symmetric_for_every_edge() {
        let classifier = classifier();
        for (area, neighbours) in LONDON_ADJACENCY {
            for neighbour in *neighbours {
                assert_eq!(
                    classifier.areas_adjacent(area, neighbour),
                    classifier.areas_adjacent(neighbour, area),
                    "asymmetric edge {area}<->{neighbour}"
                );
                assert!(classifier.areas_adjacent(neighbour, area));
            }
        }
    }

    #[test]
    fn descriptive_supplier_needs_a_wide_tier() {
        let classifier = classifier();
        let wide = classifier.evaluate("UK Wide", "SW19 2AB", RadiusTier::Wide);
        assert!(wide.served);
        assert_eq!(wide.reason, LocationReason::DescriptiveCoverage);
        assert_eq!(wide.confidence, Confidence::Medium);

        let exact = classifier.evaluate("Central London", "SW19 2AB", RadiusTier::Exact);
        assert!(!exact.served);
        assert_eq!(exact.reason, LocationReason::DescriptiveDeprioritized);
    }

    #[test]
    fn unparseable_target_is_allowed_leniently() {
        let verdict =
            classifier().evaluate("SW19", "somewhere near the common", RadiusTier::District);
        assert!(verdict.served);
        assert_eq!(verdict.reason, LocationReason::TargetNotPostcode);
        assert_eq!(verdict.confidence, Confidence::Low);
    }

    #[test]
    fn postcode_is_extracted_from_comma_addresses() {
        let verdict = classifier().evaluate(
            "The Old Hall, 12 Church Road, SW19 5AE",
            "SW19 2AB",
            RadiusTier::Exact,
        );
        assert!(verdict.served);
        assert_eq!(verdict.reason, LocationReason::SameArea);
    }

    #[test]
    fn radius_tier_is_fixed_per_category() {
        assert_eq!(RadiusTier::for_category(Category::Venues), RadiusTier::Exact);
        assert_eq!(RadiusTier::for_category(Category::Entertainment), RadiusTier::Wide);
        assert_eq!(RadiusTier::for_category(Category::Catering), RadiusTier::District);
        assert_eq!(RadiusTier::for_category(Category::Cakes), RadiusTier::District);
    }

    #[test]
    fn synthetic_geography_can_replace_the_london_table() {
        let classifier = UkLocationClassifier::with_geography(
            vec!["islandwide".to_owned()],
            vec![("AA".to_owned(), vec!["BB".to_owned()])],
        );
        let verdict = classifier.evaluate("AA1", "BB2 3CD", RadiusTier::District);
        assert!(verdict.served);
        assert_eq!(verdict.reason, LocationReason::AdjacentArea);
        assert!(!classifier.evaluate("AA1", "CC2 3CD", RadiusTier::District).served);
    }
}
