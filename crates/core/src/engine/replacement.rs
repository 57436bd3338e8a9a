use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::ReplacementWeights;
use crate::domain::brief::PartyBrief;
use crate::domain::plan::{Replacement, ReplacementReason};
use crate::domain::supplier::{Category, Supplier};

/// Related categories tried, in order, when the rejected supplier's own
/// category has no alternatives. A final pass over every category acts
/// as the catch-all.
fn fallback_categories(category: Category) -> &'static [Category] {
    match category {
        Category::Activities => &[Category::Entertainment, Category::FacePainting, Category::Activities],
        Category::Entertainment => &[Category::Activities, Category::FacePainting],
        Category::FacePainting => &[Category::Entertainment, Category::Activities],
        Category::Venues => &[Category::SoftPlay, Category::Activities],
        Category::Catering => &[Category::Cakes],
        Category::Cakes => &[Category::Catering],
        Category::Decorations => &[Category::Balloons],
        Category::Balloons => &[Category::Decorations],
        Category::PartyBags => &[Category::Decorations],
        Category::Photography => &[Category::Entertainment],
        Category::SoftPlay => &[Category::Activities, Category::Entertainment],
    }
}

struct RankedCandidate<'a> {
    supplier: &'a Supplier,
    score: f64,
    same_category: bool,
}

/// Finds a single recommended stand-in for a rejected supplier by
/// re-ranking the catalog with a replacement-specific formula.
pub struct ReplacementEngine {
    weights: ReplacementWeights,
}

impl ReplacementEngine {
    pub fn new(weights: ReplacementWeights) -> Self {
        Self { weights }
    }

    pub fn find_replacement(
        &self,
        rejected: &Supplier,
        brief: &PartyBrief,
        catalog: &[Supplier],
    ) -> Option<Replacement> {
        let (candidates, same_category) = self.candidate_pool(rejected, catalog);
        if candidates.is_empty() {
            return None;
        }

        let mut ranked: Vec<RankedCandidate<'_>> = candidates
            .into_iter()
            .map(|supplier| RankedCandidate {
                score: self.replacement_score(supplier, rejected, brief),
                supplier,
                same_category,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        let winner = &ranked[0];
        let reason = self.dominant_reason(winner.supplier, rejected);
        let improvements = self.improvements(winner.supplier, rejected);
        let auto_approved = winner.same_category
            && winner.supplier.price_from <= rejected.price_from
            && winner.supplier.rating_or_zero() >= rejected.rating_or_zero();

        Some(Replacement {
            old_supplier: rejected.clone(),
            new_supplier: winner.supplier.clone(),
            improvements,
            reason,
            auto_approved,
        })
    }

    /// Same category first, then the fixed related-category chain, then
    /// every known category. The rejected supplier itself is excluded.
    fn candidate_pool<'a>(
        &self,
        rejected: &Supplier,
        catalog: &'a [Supplier],
    ) -> (Vec<&'a Supplier>, bool) {
        let in_category = |category: Category| -> Vec<&'a Supplier> {
            catalog
                .iter()
                .filter(|candidate| candidate.category == category && candidate.id != rejected.id)
                .collect()
        };

        let same = in_category(rejected.category);
        if !same.is_empty() {
            return (same, true);
        }

        for category in fallback_categories(rejected.category) {
            let pool = in_category(*category);
            if !pool.is_empty() {
                return (pool, false);
            }
        }

        for category in Category::ALL {
            let pool = in_category(category);
            if !pool.is_empty() {
                return (pool, false);
            }
        }

        (Vec::new(), false)
    }

    fn replacement_score(&self, candidate: &Supplier, rejected: &Supplier, brief: &PartyBrief) -> f64 {
        let weights = &self.weights;
        let mut score = weights.baseline;

        let rating_delta = candidate.rating_or_zero() - rejected.rating_or_zero();
        score += weights.rating_step * rating_delta.max(0.0);

        match price_delta(rejected.price_from, candidate.price_from) {
            delta if delta > 0.0 => {
                score += (delta / weights.savings_divisor).min(weights.savings_cap);
            }
            delta if delta == 0.0 => score += weights.price_match_bonus,
            _ => {}
        }

        if brief.has_theme() && candidate.has_theme(&brief.theme) {
            score += weights.theme_match_bonus;
        }

        let review_delta =
            candidate.review_count_or_zero() as f64 - rejected.review_count_or_zero() as f64;
        score += (review_delta / weights.review_divisor).min(weights.review_cap);

        if candidate.is_premium && !rejected.is_premium {
            score += weights.premium_bonus;
        }

        if responds_faster(candidate, rejected) {
            score += weights.response_bonus;
        }

        score
    }

    /// Single dominant reason, by priority: materially better rating,
    /// then price, then response time, then premium, then the default
    /// "availability" (the supplier is simply the next best option).
    fn dominant_reason(&self, candidate: &Supplier, rejected: &Supplier) -> ReplacementReason {
        let rating_delta = candidate.rating_or_zero() - rejected.rating_or_zero();
        if rating_delta > self.weights.rating_reason_threshold {
            return ReplacementReason::BetterReviews;
        }
        if candidate.price_from < rejected.price_from {
            return ReplacementReason::Cheaper;
        }
        if candidate.price_from == rejected.price_from {
            return ReplacementReason::SamePrice;
        }
        if responds_faster(candidate, rejected) {
            return ReplacementReason::FasterResponse;
        }
        if candidate.is_premium && !rejected.is_premium {
            return ReplacementReason::PremiumUpgrade;
        }
        ReplacementReason::Availability
    }

    fn improvements(&self, candidate: &Supplier, rejected: &Supplier) -> Vec<String> {
        let mut improvements = Vec::new();

        let rating_delta = candidate.rating_or_zero() - rejected.rating_or_zero();
        if rating_delta > 0.0 {
            improvements.push(format!(
                "Higher rating: {:.1} vs {:.1}",
                candidate.rating_or_zero(),
                rejected.rating_or_zero()
            ));
        }

        if candidate.price_from < rejected.price_from {
            improvements.push(format!("Saves £{}", rejected.price_from - candidate.price_from));
        }

        if candidate.review_count_or_zero() > rejected.review_count_or_zero() {
            improvements.push(format!(
                "More reviews ({} vs {})",
                candidate.review_count_or_zero(),
                rejected.review_count_or_zero()
            ));
        }

        if candidate.is_premium && !rejected.is_premium {
            improvements.push("Premium-vetted supplier".to_owned());
        }

        if responds_faster(candidate, rejected) {
            improvements.push("Faster average response time".to_owned());
        }

        if improvements.is_empty() {
            improvements.push("Closest available alternative".to_owned());
        }

        improvements
    }
}

impl Default for ReplacementEngine {
    fn default() -> Self {
        Self::new(crate::config::EngineConfig::default().replacement)
    }
}

fn price_delta(old_price: Decimal, new_price: Decimal) -> f64 {
    (old_price - new_price).to_f64().unwrap_or(0.0)
}

fn responds_faster(candidate: &Supplier, rejected: &Supplier) -> bool {
    match (candidate.avg_response_hours, rejected.avg_response_hours) {
        (Some(candidate_hours), Some(rejected_hours)) => candidate_hours < rejected_hours,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::supplier::{SupplierId, TimeSlot};

    use super::*;

    struct SupplierSpec {
        id: &'static str,
        category: Category,
        price: i64,
        rating: f64,
        reviews: u32,
        premium: bool,
        response_hours: u32,
        themes: &'static [&'static str],
    }

    fn supplier(spec: SupplierSpec) -> Supplier {
        Supplier {
            id: SupplierId(spec.id.to_owned()),
            name: format!("Supplier {}", spec.id),
            description: None,
            category: spec.category,
            location: "SW19".to_owned(),
            price_from: Decimal::from(spec.price),
            price_unit: "per party".to_owned(),
            rating: Some(spec.rating),
            review_count: Some(spec.reviews),
            is_premium: spec.premium,
            avg_response_hours: Some(spec.response_hours),
            themes: spec.themes.iter().map(|theme| (*theme).to_owned()).collect(),
            service_themes: Vec::new(),
            availability: Vec::new(),
        }
    }

    fn brief() -> PartyBrief {
        PartyBrief {
            theme: "princess".to_owned(),
            guest_count: 12,
            date: NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(),
            time_slot: TimeSlot::Afternoon,
            duration_hours: 2,
            location: "SW19 2AB".to_owned(),
            budget: Some(Decimal::from(600)),
        }
    }

    fn venue(id: &'static str, price: i64, rating: f64) -> Supplier {
        supplier(SupplierSpec {
            id,
            category: Category::Venues,
            price,
            rating,
            reviews: 40,
            premium: false,
            response_hours: 6,
            themes: &[],
        })
    }

    #[test]
    fn empty_catalog_yields_no_replacement() {
        let rejected = venue("old", 200, 4.2);
        assert!(ReplacementEngine::default().find_replacement(&rejected, &brief(), &[]).is_none());
    }

    #[test]
    fn materially_better_rating_dominates_the_reason() {
        let rejected = venue("old", 200, 4.2);
        let better = venue("new", 200, 4.8);
        let replacement = ReplacementEngine::default()
            .find_replacement(&rejected, &brief(), &[rejected.clone(), better])
            .expect("replacement");
        assert_eq!(replacement.reason, ReplacementReason::BetterReviews);
        assert!(replacement
            .improvements
            .iter()
            .any(|improvement| improvement.starts_with("Higher rating")));
    }

    #[test]
    fn marginal_rating_gain_falls_through_to_price_comparison() {
        // Delta 0.25 does not clear the 0.3 threshold; equal price wins out.
        let rejected = venue("old", 200, 4.5);
        let slightly_better = venue("new", 200, 4.75);
        let replacement = ReplacementEngine::default()
            .find_replacement(&rejected, &brief(), &[slightly_better])
            .expect("replacement");
        assert_eq!(replacement.reason, ReplacementReason::SamePrice);
    }

    #[test]
    fn cheaper_alternative_reports_savings() {
        let rejected = venue("old", 250, 4.5);
        let cheaper = venue("new", 180, 4.5);
        let replacement = ReplacementEngine::default()
            .find_replacement(&rejected, &brief(), &[cheaper])
            .expect("replacement");
        assert_eq!(replacement.reason, ReplacementReason::Cheaper);
        assert!(replacement.improvements.iter().any(|improvement| improvement == "Saves £70"));
        assert!(replacement.auto_approved);
    }

    #[test]
    fn fallback_chain_is_used_when_the_category_is_exhausted() {
        let rejected = supplier(SupplierSpec {
            id: "old-activity",
            category: Category::Activities,
            price: 120,
            rating: 4.0,
            reviews: 20,
            premium: false,
            response_hours: 8,
            themes: &[],
        });
        let entertainer = supplier(SupplierSpec {
            id: "magician",
            category: Category::Entertainment,
            price: 100,
            rating: 4.6,
            reviews: 50,
            premium: false,
            response_hours: 4,
            themes: &["princess"],
        });

        let replacement = ReplacementEngine::default()
            .find_replacement(&rejected, &brief(), &[rejected.clone(), entertainer])
            .expect("cross-category replacement");
        assert_eq!(replacement.new_supplier.category, Category::Entertainment);
        // Cross-category hops always need the user's sign-off.
        assert!(!replacement.auto_approved);
    }

    #[test]
    fn theme_match_outranks_small_price_edge() {
        let rejected = supplier(SupplierSpec {
            id: "old",
            category: Category::Entertainment,
            price: 150,
            rating: 4.0,
            reviews: 30,
            premium: false,
            response_hours: 6,
            themes: &[],
        });
        let themed = supplier(SupplierSpec {
            id: "themed",
            category: Category::Entertainment,
            price: 150,
            rating: 4.0,
            reviews: 30,
            premium: false,
            response_hours: 6,
            themes: &["princess"],
        });
        let cheaper = supplier(SupplierSpec {
            id: "cheaper",
            category: Category::Entertainment,
            price: 120,
            rating: 4.0,
            reviews: 30,
            premium: false,
            response_hours: 6,
            themes: &[],
        });

        // Theme bonus (25) beats the capped savings bonus (3).
        let replacement = ReplacementEngine::default()
            .find_replacement(&rejected, &brief(), &[themed, cheaper])
            .expect("replacement");
        assert_eq!(replacement.new_supplier.id, SupplierId("themed".to_owned()));
    }
}
