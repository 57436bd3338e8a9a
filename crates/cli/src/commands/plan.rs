use std::path::PathBuf;

use crate::commands::CommandResult;
use soiree_catalog::{snapshot_for_theme, InMemorySupplierCatalog};
use soiree_core::config::{EngineConfig, LoadOptions};
use soiree_core::{PartyBrief, PartyPlanBuilder, PlanSlot};

pub fn run(brief: PartyBrief, catalog_path: Option<PathBuf>) -> CommandResult {
    if let Err(error) = brief.validate() {
        return CommandResult::failure("plan", "invalid_brief", error.to_string(), 2);
    }

    let config = match EngineConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "plan",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let catalog = match load_catalog(catalog_path) {
        Ok(catalog) => catalog,
        Err(error) => return CommandResult::failure("plan", "catalog_load", error.to_string(), 4),
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "plan",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let snapshot = match runtime.block_on(snapshot_for_theme(&catalog, &brief.theme)) {
        Ok(snapshot) => snapshot,
        Err(error) => return CommandResult::failure("plan", "catalog_load", error.to_string(), 4),
    };

    let builder = PartyPlanBuilder::from_config(&config);
    let build = builder.build(&brief, &snapshot);

    tracing::info!(
        event_name = "engine.plan.completed",
        tier = ?build.allocation.tier,
        total_cost = %build.plan.total_cost(),
        needs_confirmation = build.plan.needs_confirmation(),
        "party plan assembled"
    );

    let filled = PlanSlot::ALL.iter().filter(|slot| build.plan.slot(**slot).is_some()).count();
    let message = format!(
        "plan assembled: {filled} of {} slots filled, total £{}{}",
        build.allocation.included_slots.len() + 1,
        build.plan.total_cost(),
        if build.plan.needs_confirmation() { ", confirmation needed" } else { "" },
    );

    match serde_json::to_value(&build) {
        Ok(result) => CommandResult::success_with("plan", message, result),
        Err(error) => CommandResult::failure("plan", "serialization", error.to_string(), 1),
    }
}

pub(crate) fn load_catalog(
    path: Option<PathBuf>,
) -> Result<InMemorySupplierCatalog, soiree_catalog::CatalogError> {
    match path {
        Some(path) => InMemorySupplierCatalog::from_json_file(path),
        None => Ok(InMemorySupplierCatalog::new(soiree_catalog::fixtures::demo_catalog())),
    }
}
