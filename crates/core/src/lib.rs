pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod themes;

pub use config::{ConfigError, EngineConfig, LoadOptions};
pub use domain::brief::{PartyBrief, NO_THEME};
pub use domain::plan::{
    PartyPlan, PlanItemStatus, PlanLineItem, PlanSlot, Replacement, ReplacementReason,
};
pub use domain::supplier::{
    AvailabilitySpec, Category, DateRestriction, DayOfWeek, Supplier, SupplierId, TimeSlot,
    WorkingDay,
};
pub use engine::{
    AvailabilityOracle, BudgetAllocation, BudgetAllocator, BudgetTier, CatalogSnapshot,
    CategorySelection, CategorySelector, Confidence, LocationClassifier, PartyPlanBuilder,
    PlanBuild, RadiusTier, ReplacementEngine, SelectionReason, UkLocationClassifier,
};
pub use errors::{ApplicationError, DomainError};
pub use themes::{ThemeCatalog, ThemeDefinition, ThemePriority};
