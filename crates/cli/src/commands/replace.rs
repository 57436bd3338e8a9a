use std::path::PathBuf;

use crate::commands::{plan::load_catalog, CommandResult};
use soiree_catalog::SupplierCatalog;
use soiree_core::config::{EngineConfig, LoadOptions};
use soiree_core::{PartyBrief, ReplacementEngine};

pub fn run(brief: PartyBrief, supplier_id: &str, catalog_path: Option<PathBuf>) -> CommandResult {
    if let Err(error) = brief.validate() {
        return CommandResult::failure("replace", "invalid_brief", error.to_string(), 2);
    }

    let config = match EngineConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "replace",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let catalog = match load_catalog(catalog_path) {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure("replace", "catalog_load", error.to_string(), 4);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "replace",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let suppliers = match runtime.block_on(catalog.all_suppliers()) {
        Ok(suppliers) => suppliers,
        Err(error) => {
            return CommandResult::failure("replace", "catalog_load", error.to_string(), 4);
        }
    };

    let Some(rejected) = suppliers.iter().find(|supplier| supplier.id.0 == supplier_id) else {
        return CommandResult::failure(
            "replace",
            "unknown_supplier",
            format!("supplier `{supplier_id}` is not in the catalog"),
            4,
        );
    };

    let engine = ReplacementEngine::new(config.replacement.clone());
    match engine.find_replacement(rejected, &brief, &suppliers) {
        Some(replacement) => {
            tracing::info!(
                event_name = "engine.replace.completed",
                rejected = %rejected.id,
                replacement = %replacement.new_supplier.id,
                auto_approved = replacement.auto_approved,
                "replacement proposed"
            );
            let message = format!(
                "replacement for `{}`: `{}`{}",
                rejected.name,
                replacement.new_supplier.name,
                if replacement.auto_approved { " (auto-approved)" } else { "" },
            );
            match serde_json::to_value(&replacement) {
                Ok(result) => CommandResult::success_with("replace", message, result),
                Err(error) => {
                    CommandResult::failure("replace", "serialization", error.to_string(), 1)
                }
            }
        }
        None => CommandResult::success(
            "replace",
            format!("no replacement candidates for `{}`", rejected.name),
        ),
    }
}
