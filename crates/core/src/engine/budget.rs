use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::plan::PlanSlot;

/// Discrete spending band. Tier selection is total-budget driven, with
/// guest count splitting the top band: large parties trade decoration
/// share for activities and hired soft play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Essentials,
    Standard,
    Premium,
    PremiumLarge,
}

impl BudgetTier {
    pub fn for_brief(budget: Decimal, guest_count: u32) -> Self {
        if budget <= Decimal::from(500) {
            BudgetTier::Essentials
        } else if budget <= Decimal::from(700) {
            BudgetTier::Standard
        } else if guest_count < 30 {
            BudgetTier::Premium
        } else {
            BudgetTier::PremiumLarge
        }
    }

    /// Slot fractions for this tier, in hundredths. Fractions sum to at
    /// most 1; the unallocated remainder is deliberately not spent.
    fn fraction_table(&self) -> &'static [(PlanSlot, i64)] {
        match self {
            BudgetTier::Essentials => &[
                (PlanSlot::Venue, 45),
                (PlanSlot::Entertainment, 35),
                (PlanSlot::Cakes, 15),
                (PlanSlot::PartyBags, 5),
            ],
            BudgetTier::Standard => &[
                (PlanSlot::Venue, 35),
                (PlanSlot::Entertainment, 35),
                (PlanSlot::Cakes, 25),
                (PlanSlot::PartyBags, 5),
            ],
            BudgetTier::Premium => &[
                (PlanSlot::Venue, 25),
                (PlanSlot::Entertainment, 30),
                (PlanSlot::Cakes, 20),
                (PlanSlot::Decorations, 15),
                (PlanSlot::Activities, 6),
                (PlanSlot::PartyBags, 4),
            ],
            BudgetTier::PremiumLarge => &[
                (PlanSlot::Venue, 25),
                (PlanSlot::Entertainment, 25),
                (PlanSlot::Cakes, 15),
                (PlanSlot::Decorations, 8),
                (PlanSlot::Activities, 15),
                (PlanSlot::PartyBags, 4),
                (PlanSlot::SoftPlay, 8),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub tier: BudgetTier,
    pub total_budget: Decimal,
    pub included_slots: Vec<PlanSlot>,
    pub fractions: BTreeMap<PlanSlot, Decimal>,
}

impl BudgetAllocation {
    pub fn includes(&self, slot: PlanSlot) -> bool {
        self.fractions.contains_key(&slot)
    }

    /// Sub-budget for a slot; zero for slots outside the tier.
    pub fn slot_budget(&self, slot: PlanSlot) -> Decimal {
        self.fractions
            .get(&slot)
            .map(|fraction| self.total_budget * fraction)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Maps a total budget and guest count into per-slot sub-budgets using
/// the four-tier table. Deterministic; no error conditions — a
/// non-positive budget lands in the lowest tier and upstream defaulting
/// handles blank budgets.
#[derive(Clone, Debug, Default)]
pub struct BudgetAllocator;

impl BudgetAllocator {
    pub fn allocate(&self, budget: Decimal, guest_count: u32) -> BudgetAllocation {
        let tier = BudgetTier::for_brief(budget, guest_count);
        let table = tier.fraction_table();

        let included_slots: Vec<PlanSlot> = table.iter().map(|(slot, _)| *slot).collect();
        let fractions: BTreeMap<PlanSlot, Decimal> = table
            .iter()
            .map(|(slot, hundredths)| (*slot, Decimal::new(*hundredths, 2)))
            .collect();

        BudgetAllocation { tier, total_budget: budget, included_slots, fractions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_fractions_never_exceed_whole_budget() {
        for tier in [
            BudgetTier::Essentials,
            BudgetTier::Standard,
            BudgetTier::Premium,
            BudgetTier::PremiumLarge,
        ] {
            let total: i64 = tier.fraction_table().iter().map(|(_, hundredths)| hundredths).sum();
            assert!(total <= 100, "{tier:?} allocates {total} hundredths");
        }
    }

    #[test]
    fn tier_boundaries_are_inclusive_at_500_and_700() {
        assert_eq!(BudgetTier::for_brief(Decimal::from(500), 10), BudgetTier::Essentials);
        assert_eq!(BudgetTier::for_brief(Decimal::from(501), 10), BudgetTier::Standard);
        assert_eq!(BudgetTier::for_brief(Decimal::from(700), 10), BudgetTier::Standard);
        assert_eq!(BudgetTier::for_brief(Decimal::from(701), 10), BudgetTier::Premium);
    }

    #[test]
    fn large_parties_get_soft_play_share() {
        let allocator = BudgetAllocator;
        let large = allocator.allocate(Decimal::from(1000), 35);
        assert_eq!(large.tier, BudgetTier::PremiumLarge);
        assert!(large.includes(PlanSlot::SoftPlay));
        assert_eq!(large.slot_budget(PlanSlot::SoftPlay), Decimal::from(80));

        let standard = allocator.allocate(Decimal::from(1000), 20);
        assert_eq!(standard.tier, BudgetTier::Premium);
        assert!(!standard.includes(PlanSlot::SoftPlay));
    }

    #[test]
    fn non_positive_budget_falls_into_lowest_tier() {
        let allocation = BudgetAllocator.allocate(Decimal::ZERO, 10);
        assert_eq!(allocation.tier, BudgetTier::Essentials);
        assert_eq!(allocation.slot_budget(PlanSlot::Venue), Decimal::ZERO);
    }

    #[test]
    fn essentials_tier_splits_per_table() {
        let allocation = BudgetAllocator.allocate(Decimal::from(500), 10);
        assert_eq!(allocation.slot_budget(PlanSlot::Venue), Decimal::from(225));
        assert_eq!(allocation.slot_budget(PlanSlot::Entertainment), Decimal::from(175));
        assert_eq!(allocation.slot_budget(PlanSlot::Cakes), Decimal::from(75));
        assert_eq!(allocation.slot_budget(PlanSlot::PartyBags), Decimal::from(25));
        assert_eq!(allocation.slot_budget(PlanSlot::Decorations), Decimal::ZERO);
    }
}
