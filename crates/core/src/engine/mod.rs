pub mod availability;
pub mod budget;
pub mod builder;
pub mod location;
pub mod replacement;
pub mod scoring;
pub mod selector;

pub use availability::{AvailabilityOracle, AvailabilityReason, AvailabilityVerdict, Confidence};
pub use budget::{BudgetAllocation, BudgetAllocator, BudgetTier};
pub use builder::{CatalogSnapshot, PartyPlanBuilder, PlanBuild};
pub use location::{
    LocationClassifier, LocationReason, LocationVerdict, RadiusTier, UkLocationClassifier,
};
pub use replacement::ReplacementEngine;
pub use scoring::SupplierScorer;
pub use selector::{CategorySelection, CategorySelector, SelectionReason, SelectionRequest};
