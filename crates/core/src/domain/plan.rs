use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::supplier::{Category, Supplier, SupplierId};

/// Fixed plan slots. Every plan carries all of them; slots outside the
/// current budget tier simply stay unfilled. `Einvites` is the one
/// non-negotiable line item and is never selected from the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanSlot {
    Venue,
    Entertainment,
    Cakes,
    Catering,
    FacePainting,
    Activities,
    PartyBags,
    Decorations,
    Balloons,
    SoftPlay,
    Einvites,
}

impl PlanSlot {
    pub const ALL: [PlanSlot; 11] = [
        PlanSlot::Venue,
        PlanSlot::Entertainment,
        PlanSlot::Cakes,
        PlanSlot::Catering,
        PlanSlot::FacePainting,
        PlanSlot::Activities,
        PlanSlot::PartyBags,
        PlanSlot::Decorations,
        PlanSlot::Balloons,
        PlanSlot::SoftPlay,
        PlanSlot::Einvites,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanSlot::Venue => "venue",
            PlanSlot::Entertainment => "entertainment",
            PlanSlot::Cakes => "cakes",
            PlanSlot::Catering => "catering",
            PlanSlot::FacePainting => "facePainting",
            PlanSlot::Activities => "activities",
            PlanSlot::PartyBags => "partyBags",
            PlanSlot::Decorations => "decorations",
            PlanSlot::Balloons => "balloons",
            PlanSlot::SoftPlay => "softPlay",
            PlanSlot::Einvites => "einvites",
        }
    }

    /// Supplier category this slot is filled from. `Einvites` has none.
    pub fn category(&self) -> Option<Category> {
        match self {
            PlanSlot::Venue => Some(Category::Venues),
            PlanSlot::Entertainment => Some(Category::Entertainment),
            PlanSlot::Cakes => Some(Category::Cakes),
            PlanSlot::Catering => Some(Category::Catering),
            PlanSlot::FacePainting => Some(Category::FacePainting),
            PlanSlot::Activities => Some(Category::Activities),
            PlanSlot::PartyBags => Some(Category::PartyBags),
            PlanSlot::Decorations => Some(Category::Decorations),
            PlanSlot::Balloons => Some(Category::Balloons),
            PlanSlot::SoftPlay => Some(Category::SoftPlay),
            PlanSlot::Einvites => None,
        }
    }
}

impl std::fmt::Display for PlanSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanItemStatus {
    Pending,
    NeedsConfirmation,
}

/// One committed slot of a plan, shaped for the persistence collaborator.
/// `category` is the plan slot key, not the supplier classification, so
/// the fixed e-invites line fits the same shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLineItem {
    pub id: SupplierId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub status: PlanItemStatus,
    pub category: PlanSlot,
    pub price_unit: String,
    pub original_supplier: Option<Supplier>,
    pub is_fallback_selection: bool,
}

impl PlanLineItem {
    pub fn from_supplier(supplier: &Supplier, slot: PlanSlot, is_fallback: bool) -> Self {
        Self {
            id: supplier.id.clone(),
            name: supplier.name.clone(),
            description: supplier.description.clone(),
            price: supplier.price_from,
            status: if is_fallback {
                PlanItemStatus::NeedsConfirmation
            } else {
                PlanItemStatus::Pending
            },
            category: slot,
            price_unit: supplier.price_unit.clone(),
            original_supplier: Some(supplier.clone()),
            is_fallback_selection: is_fallback,
        }
    }
}

/// Assembled party plan. Built fresh on every planning run; persistence
/// is an external collaborator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyPlan {
    pub venue: Option<PlanLineItem>,
    pub entertainment: Option<PlanLineItem>,
    pub cakes: Option<PlanLineItem>,
    pub catering: Option<PlanLineItem>,
    pub face_painting: Option<PlanLineItem>,
    pub activities: Option<PlanLineItem>,
    pub party_bags: Option<PlanLineItem>,
    pub decorations: Option<PlanLineItem>,
    pub balloons: Option<PlanLineItem>,
    pub soft_play: Option<PlanLineItem>,
    pub einvites: Option<PlanLineItem>,
}

impl PartyPlan {
    pub fn slot(&self, slot: PlanSlot) -> Option<&PlanLineItem> {
        match slot {
            PlanSlot::Venue => self.venue.as_ref(),
            PlanSlot::Entertainment => self.entertainment.as_ref(),
            PlanSlot::Cakes => self.cakes.as_ref(),
            PlanSlot::Catering => self.catering.as_ref(),
            PlanSlot::FacePainting => self.face_painting.as_ref(),
            PlanSlot::Activities => self.activities.as_ref(),
            PlanSlot::PartyBags => self.party_bags.as_ref(),
            PlanSlot::Decorations => self.decorations.as_ref(),
            PlanSlot::Balloons => self.balloons.as_ref(),
            PlanSlot::SoftPlay => self.soft_play.as_ref(),
            PlanSlot::Einvites => self.einvites.as_ref(),
        }
    }

    pub fn set_slot(&mut self, slot: PlanSlot, item: Option<PlanLineItem>) {
        match slot {
            PlanSlot::Venue => self.venue = item,
            PlanSlot::Entertainment => self.entertainment = item,
            PlanSlot::Cakes => self.cakes = item,
            PlanSlot::Catering => self.catering = item,
            PlanSlot::FacePainting => self.face_painting = item,
            PlanSlot::Activities => self.activities = item,
            PlanSlot::PartyBags => self.party_bags = item,
            PlanSlot::Decorations => self.decorations = item,
            PlanSlot::Balloons => self.balloons = item,
            PlanSlot::SoftPlay => self.soft_play = item,
            PlanSlot::Einvites => self.einvites = item,
        }
    }

    /// Sum of selected prices across every filled slot.
    pub fn total_cost(&self) -> Decimal {
        PlanSlot::ALL
            .iter()
            .filter_map(|slot| self.slot(*slot))
            .map(|item| item.price)
            .sum()
    }

    /// True when any filled slot is a fallback pick awaiting the user.
    pub fn needs_confirmation(&self) -> bool {
        PlanSlot::ALL
            .iter()
            .filter_map(|slot| self.slot(*slot))
            .any(|item| item.status == PlanItemStatus::NeedsConfirmation)
    }
}

/// Dominant reason attached to a replacement recommendation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementReason {
    BetterReviews,
    Cheaper,
    SamePrice,
    FasterResponse,
    PremiumUpgrade,
    Availability,
}

impl ReplacementReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplacementReason::BetterReviews => "better_reviews",
            ReplacementReason::Cheaper => "cheaper",
            ReplacementReason::SamePrice => "same_price",
            ReplacementReason::FasterResponse => "faster_response",
            ReplacementReason::PremiumUpgrade => "premium_upgrade",
            ReplacementReason::Availability => "availability",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Replacement {
    pub old_supplier: Supplier,
    pub new_supplier: Supplier,
    pub improvements: Vec<String>,
    pub reason: ReplacementReason,
    pub auto_approved: bool,
}
