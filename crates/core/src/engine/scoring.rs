use crate::config::ThemeWeights;
use crate::domain::brief::NO_THEME;
use crate::domain::supplier::Supplier;

/// Theme/rating affinity score for a single supplier. Base value plus
/// additive bonuses; never fails and never goes negative.
#[derive(Clone, Debug)]
pub struct SupplierScorer {
    weights: ThemeWeights,
}

impl SupplierScorer {
    pub fn new(weights: ThemeWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, supplier: &Supplier, theme: &str) -> f64 {
        let weights = &self.weights;
        let mut score = weights.base;

        if theme == NO_THEME {
            if supplier.themes.is_empty() {
                score += weights.unthemed_bonus;
            }
            if supplier.has_theme("general") {
                score += weights.general_bonus;
            }
        } else {
            if supplier.has_theme(theme) {
                score += weights.exact_match;
            }
            if supplier.has_service_theme(theme) {
                score += weights.service_match;
            }
            if contains_ignore_case(&supplier.name, theme) {
                score += weights.name_mention;
            }
            if supplier
                .description
                .as_deref()
                .is_some_and(|description| contains_ignore_case(description, theme))
            {
                score += weights.description_mention;
            }
        }

        // Ratings outside 0-5 are catalog noise; clamp rather than let a
        // bad record distort the ranking.
        let rating = supplier.rating.filter(|rating| rating.is_finite()).unwrap_or(0.0);
        score += rating.clamp(0.0, 5.0) * weights.rating_multiplier;

        score.max(0.0)
    }
}

impl Default for SupplierScorer {
    fn default() -> Self {
        Self::new(crate::config::EngineConfig::default().theme)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(&needle.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::supplier::{Category, SupplierId};

    use super::*;

    fn supplier(themes: &[&str], name: &str, rating: Option<f64>) -> Supplier {
        Supplier {
            id: SupplierId("sup-1".to_owned()),
            name: name.to_owned(),
            description: Some("Parties across South London".to_owned()),
            category: Category::Entertainment,
            location: "SW19".to_owned(),
            price_from: Decimal::from(150),
            price_unit: "per party".to_owned(),
            rating,
            review_count: Some(10),
            is_premium: false,
            avg_response_hours: Some(6),
            themes: themes.iter().map(|theme| (*theme).to_owned()).collect(),
            service_themes: Vec::new(),
            availability: Vec::new(),
        }
    }

    #[test]
    fn exact_theme_match_and_rating_stack_on_the_base() {
        let scorer = SupplierScorer::default();
        let score = scorer.score(&supplier(&["princess"], "Magic Mike", Some(4.0)), "princess");
        // 50 base + 50 exact + 8 rating
        assert_eq!(score, 108.0);
    }

    #[test]
    fn name_and_description_mentions_add_smaller_bonuses() {
        let scorer = SupplierScorer::default();
        let with_name =
            scorer.score(&supplier(&[], "Princess Party People", None), "princess");
        assert_eq!(with_name, 70.0);

        let with_description = scorer.score(&supplier(&[], "Party People", None), "london");
        // description mentions "South London"
        assert_eq!(with_description, 60.0);
    }

    #[test]
    fn no_theme_brief_prefers_general_suppliers() {
        let scorer = SupplierScorer::default();
        let unthemed = scorer.score(&supplier(&[], "Party People", None), NO_THEME);
        assert_eq!(unthemed, 80.0);

        let general = scorer.score(&supplier(&["general"], "Party People", None), NO_THEME);
        assert_eq!(general, 90.0);
    }

    #[test]
    fn general_bonus_ignores_service_themes() {
        let scorer = SupplierScorer::default();
        let mut service_only = supplier(&[], "Party People", None);
        service_only.service_themes = vec!["general".to_owned()];
        // Unthemed bonus only; "general" in service themes earns nothing.
        assert_eq!(scorer.score(&service_only, NO_THEME), 80.0);
    }

    #[test]
    fn malformed_rating_degrades_to_the_base_score() {
        let scorer = SupplierScorer::default();
        let score = scorer.score(&supplier(&[], "Party People", Some(f64::NAN)), "pirate");
        assert_eq!(score, 50.0);

        let overflow = scorer.score(&supplier(&[], "Party People", Some(99.0)), "pirate");
        assert_eq!(overflow, 60.0);
    }
}
