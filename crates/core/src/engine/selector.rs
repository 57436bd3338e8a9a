use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::SelectionWeights;
use crate::domain::supplier::{Category, Supplier, TimeSlot};
use crate::engine::availability::{AvailabilityOracle, AvailabilityVerdict, Confidence};
use crate::engine::location::{
    LocationClassifier, LocationVerdict, RadiusTier, UkLocationClassifier,
};
use crate::engine::scoring::SupplierScorer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionReason {
    NoSuppliersFound,
    NoSuppliersInBudget,
    BestAvailableMatch,
    BestFallbackMatch,
}

impl SelectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionReason::NoSuppliersFound => "no-suppliers-found",
            SelectionReason::NoSuppliersInBudget => "no-suppliers-in-budget",
            SelectionReason::BestAvailableMatch => "best-available-match",
            SelectionReason::BestFallbackMatch => "best-fallback-match",
        }
    }
}

/// One per-category decision context.
#[derive(Clone, Debug)]
pub struct SelectionRequest<'a> {
    pub category: Category,
    pub theme: &'a str,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub target_location: &'a str,
    pub category_budget: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySelection {
    pub supplier: Option<Supplier>,
    pub composite_score: f64,
    pub is_available: bool,
    pub can_serve_location: bool,
    pub is_fallback_selection: bool,
    pub requires_confirmation: bool,
    pub reason: SelectionReason,
    pub availability: Option<AvailabilityVerdict>,
    pub location: Option<LocationVerdict>,
}

impl CategorySelection {
    fn unfilled(reason: SelectionReason) -> Self {
        Self {
            supplier: None,
            composite_score: 0.0,
            is_available: false,
            can_serve_location: false,
            is_fallback_selection: false,
            requires_confirmation: false,
            reason,
            availability: None,
            location: None,
        }
    }
}

struct ScoredCandidate<'a> {
    supplier: &'a Supplier,
    composite_score: f64,
    availability: AvailabilityVerdict,
    location: LocationVerdict,
}

/// Per-category decision procedure: filter by sub-budget, score the
/// survivors, pick a winner. Ties keep catalog order (stable sort), so
/// repeated runs over the same snapshot are deterministic. A category
/// with at least one in-budget candidate always yields a pick — at
/// worst a fallback flagged for user confirmation.
pub struct CategorySelector<L = UkLocationClassifier> {
    weights: SelectionWeights,
    oracle: AvailabilityOracle,
    scorer: SupplierScorer,
    classifier: L,
}

impl<L: LocationClassifier> CategorySelector<L> {
    pub fn new(
        weights: SelectionWeights,
        oracle: AvailabilityOracle,
        scorer: SupplierScorer,
        classifier: L,
    ) -> Self {
        Self { weights, oracle, scorer, classifier }
    }

    pub fn select(&self, candidates: &[Supplier], request: &SelectionRequest<'_>) -> CategorySelection {
        if candidates.is_empty() {
            return CategorySelection::unfilled(SelectionReason::NoSuppliersFound);
        }

        let price_ceiling = request.category_budget * self.weights.budget_tolerance;
        let in_budget: Vec<&Supplier> = candidates
            .iter()
            .filter(|candidate| candidate.price_from <= price_ceiling)
            .collect();
        if in_budget.is_empty() {
            return CategorySelection::unfilled(SelectionReason::NoSuppliersInBudget);
        }

        let tier = RadiusTier::for_category(request.category);
        let mut scored: Vec<ScoredCandidate<'_>> = in_budget
            .into_iter()
            .map(|supplier| {
                let availability = self.oracle.check(supplier, request.date, request.time_slot);
                let location =
                    self.classifier.evaluate(&supplier.location, request.target_location, tier);
                let composite_score = self.scorer.score(supplier, request.theme)
                    + self.availability_adjustment(availability)
                    + self.location_adjustment(location);
                ScoredCandidate { supplier, composite_score, availability, location }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.composite_score
                .partial_cmp(&a.composite_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let perfect = scored
            .iter()
            .find(|candidate| candidate.availability.available && candidate.location.served);

        match perfect {
            Some(winner) => CategorySelection {
                supplier: Some(winner.supplier.clone()),
                composite_score: winner.composite_score,
                is_available: true,
                can_serve_location: true,
                is_fallback_selection: false,
                requires_confirmation: false,
                reason: SelectionReason::BestAvailableMatch,
                availability: Some(winner.availability),
                location: Some(winner.location),
            },
            None => {
                // Best-effort pick: the caller decides whether a supplier
                // that fails availability or range is acceptable.
                let best = &scored[0];
                CategorySelection {
                    supplier: Some(best.supplier.clone()),
                    composite_score: best.composite_score,
                    is_available: best.availability.available,
                    can_serve_location: best.location.served,
                    is_fallback_selection: true,
                    requires_confirmation: true,
                    reason: SelectionReason::BestFallbackMatch,
                    availability: Some(best.availability),
                    location: Some(best.location),
                }
            }
        }
    }

    fn availability_adjustment(&self, verdict: AvailabilityVerdict) -> f64 {
        if !verdict.available {
            self.weights.availability_unavailable
        } else if verdict.confidence == Confidence::High {
            self.weights.availability_high
        } else {
            self.weights.availability_low
        }
    }

    fn location_adjustment(&self, verdict: LocationVerdict) -> f64 {
        if !verdict.served {
            self.weights.location_unserved
        } else if verdict.confidence == Confidence::High {
            self.weights.location_high
        } else {
            self.weights.location_low
        }
    }
}

impl Default for CategorySelector<UkLocationClassifier> {
    fn default() -> Self {
        let config = crate::config::EngineConfig::default();
        Self::new(
            config.selection,
            AvailabilityOracle,
            SupplierScorer::new(config.theme),
            UkLocationClassifier::new(),
        )
    }
}
