use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::domain::brief::PartyBrief;
use crate::domain::plan::{PartyPlan, PlanItemStatus, PlanLineItem, PlanSlot};
use crate::domain::supplier::{Category, Supplier, SupplierId};
use crate::engine::availability::AvailabilityOracle;
use crate::engine::budget::{BudgetAllocation, BudgetAllocator};
use crate::engine::location::{LocationClassifier, UkLocationClassifier};
use crate::engine::scoring::SupplierScorer;
use crate::engine::selector::{CategorySelection, CategorySelector, SelectionRequest};

/// Read-only catalog view handed to one planning run. Catalog I/O stays
/// at the boundary; the builder itself never fetches anything.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub suppliers: Vec<Supplier>,
    /// Pre-filtered entertainment pool for the brief's theme; may be
    /// empty, in which case the full Entertainment category is used.
    pub themed_entertainment: Vec<Supplier>,
}

impl CatalogSnapshot {
    pub fn in_category(&self, category: Category) -> Vec<Supplier> {
        self.suppliers
            .iter()
            .filter(|supplier| supplier.category == category)
            .cloned()
            .collect()
    }
}

/// Full output of a planning run: the plan plus the allocation and the
/// per-slot decisions that produced it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanBuild {
    pub plan: PartyPlan,
    pub allocation: BudgetAllocation,
    pub selections: BTreeMap<PlanSlot, CategorySelection>,
}

/// Orchestrates one planning run: allocate the budget once, then resolve
/// each included slot independently via the category selector.
/// Entertainment is resolved first against the theme-filtered pool so
/// theme fidelity is never starved; each remaining slot draws on its own
/// fixed sub-budget, so order beyond that does not affect the outcome.
/// Greedy per slot: an earlier pick is never revisited to benefit a
/// later one.
pub struct PartyPlanBuilder<L = UkLocationClassifier> {
    allocator: BudgetAllocator,
    selector: CategorySelector<L>,
}

impl PartyPlanBuilder<UkLocationClassifier> {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            BudgetAllocator,
            CategorySelector::new(
                config.selection.clone(),
                AvailabilityOracle,
                SupplierScorer::new(config.theme.clone()),
                UkLocationClassifier::new(),
            ),
        )
    }
}

impl Default for PartyPlanBuilder<UkLocationClassifier> {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl<L: LocationClassifier> PartyPlanBuilder<L> {
    pub fn new(allocator: BudgetAllocator, selector: CategorySelector<L>) -> Self {
        Self { allocator, selector }
    }

    pub fn build(&self, brief: &PartyBrief, snapshot: &CatalogSnapshot) -> PlanBuild {
        let budget = brief.effective_budget();
        let allocation = self.allocator.allocate(budget, brief.guest_count);

        let mut plan = PartyPlan::default();
        plan.set_slot(PlanSlot::Einvites, Some(einvites_line()));

        let mut selections = BTreeMap::new();

        if allocation.includes(PlanSlot::Entertainment) {
            let selection = self.select_entertainment(brief, snapshot, &allocation);
            self.apply_selection(&mut plan, PlanSlot::Entertainment, &selection);
            selections.insert(PlanSlot::Entertainment, selection);
        }

        for slot in &allocation.included_slots {
            let slot = *slot;
            if slot == PlanSlot::Entertainment {
                continue;
            }
            let category = match slot.category() {
                Some(category) => category,
                None => continue,
            };
            let candidates = snapshot.in_category(category);
            let selection = self.selector.select(
                &candidates,
                &self.request_for(brief, category, allocation.slot_budget(slot)),
            );
            self.apply_selection(&mut plan, slot, &selection);
            selections.insert(slot, selection);
        }

        PlanBuild { plan, allocation, selections }
    }

    /// Entertainment resolves against the theme-filtered pool first; if
    /// that pool is empty or yields nothing in budget, the full category
    /// gets a second pass.
    fn select_entertainment(
        &self,
        brief: &PartyBrief,
        snapshot: &CatalogSnapshot,
        allocation: &BudgetAllocation,
    ) -> CategorySelection {
        let budget = allocation.slot_budget(PlanSlot::Entertainment);
        let request = self.request_for(brief, Category::Entertainment, budget);

        if !snapshot.themed_entertainment.is_empty() {
            let themed = self.selector.select(&snapshot.themed_entertainment, &request);
            if themed.supplier.is_some() {
                return themed;
            }
        }

        self.selector.select(&snapshot.in_category(Category::Entertainment), &request)
    }

    fn request_for<'a>(
        &self,
        brief: &'a PartyBrief,
        category: Category,
        category_budget: rust_decimal::Decimal,
    ) -> SelectionRequest<'a> {
        SelectionRequest {
            category,
            theme: &brief.theme,
            date: brief.date,
            time_slot: brief.time_slot,
            target_location: &brief.location,
            category_budget,
        }
    }

    fn apply_selection(&self, plan: &mut PartyPlan, slot: PlanSlot, selection: &CategorySelection) {
        if let Some(supplier) = &selection.supplier {
            plan.set_slot(
                slot,
                Some(PlanLineItem::from_supplier(supplier, slot, selection.is_fallback_selection)),
            );
        }
    }
}

/// Every plan carries digital e-invites; they are not selected from the
/// catalog and cost nothing.
fn einvites_line() -> PlanLineItem {
    PlanLineItem {
        id: SupplierId("einvites".to_owned()),
        name: "Digital E-invites".to_owned(),
        description: Some("Themed digital invitations, included with every plan".to_owned()),
        price: rust_decimal::Decimal::ZERO,
        status: PlanItemStatus::Pending,
        category: PlanSlot::Einvites,
        price_unit: "included".to_owned(),
        original_supplier: None,
        is_fallback_selection: false,
    }
}
