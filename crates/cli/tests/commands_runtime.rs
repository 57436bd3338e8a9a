use std::env;
use std::sync::{Mutex, OnceLock};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use soiree_cli::commands::{config, plan, replace, seed};
use soiree_core::{PartyBrief, TimeSlot};

fn demo_brief() -> PartyBrief {
    PartyBrief {
        theme: "princess".to_owned(),
        guest_count: 12,
        date: NaiveDate::from_ymd_opt(2026, 10, 3).expect("valid date"),
        time_slot: TimeSlot::Afternoon,
        duration_hours: 2,
        location: "SW19 1RG".to_owned(),
        budget: Some(Decimal::from(800)),
    }
}

#[test]
fn plan_fills_slots_from_the_demo_catalog() {
    with_env(&[], || {
        let result = plan::run(demo_brief(), None);
        assert_eq!(result.exit_code, 0, "expected successful plan run: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "plan");
        assert_eq!(payload["status"], "ok");

        let plan = &payload["result"]["plan"];
        assert!(plan["venue"].is_object(), "venue slot should be filled");
        assert!(plan["entertainment"].is_object(), "entertainment slot should be filled");
        assert_eq!(plan["einvites"]["price"], "0");
        assert_eq!(plan["einvites"]["status"], "pending");
    });
}

#[test]
fn plan_rejects_a_zero_guest_brief() {
    with_env(&[], || {
        let mut brief = demo_brief();
        brief.guest_count = 0;

        let result = plan::run(brief, None);
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "invalid_brief");
    });
}

#[test]
fn replace_reports_unknown_supplier() {
    with_env(&[], || {
        let result = replace::run(demo_brief(), "no-such-supplier", None);
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "replace");
        assert_eq!(payload["error_class"], "unknown_supplier");
    });
}

#[test]
fn replace_proposes_a_candidate_from_the_demo_catalog() {
    with_env(&[], || {
        let result = replace::run(demo_brief(), "ent-princess-parties", None);
        assert_eq!(result.exit_code, 0, "expected replacement: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "ok");

        let replacement = &payload["result"];
        assert_ne!(replacement["newSupplier"]["id"], "ent-princess-parties");
        assert!(replacement["reason"].is_string());
        assert!(replacement["improvements"].is_array());
    });
}

#[test]
fn seed_output_loads_back_into_a_plan_run() {
    with_env(&[], || {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("catalog.json");

        let seeded = seed::run(&path);
        assert_eq!(seeded.exit_code, 0, "expected seed success: {}", seeded.output);
        assert_eq!(parse_payload(&seeded.output)["status"], "ok");

        let planned = plan::run(demo_brief(), Some(path));
        assert_eq!(planned.exit_code, 0, "expected plan over seeded catalog: {}", planned.output);
        let payload = parse_payload(&planned.output);
        assert!(payload["result"]["plan"]["entertainment"].is_object());
    });
}

#[test]
fn config_attributes_env_overrides() {
    with_env(&[("SOIREE_LOG_LEVEL", "debug")], || {
        let output = config::run();
        assert!(output.contains("- logging.level = debug (source: env (SOIREE_LOG_LEVEL))"));
        assert!(output.contains("- selection.budget_tolerance = 1.3 (source: default)"));
    });
}

fn parse_payload(raw: &str) -> Value {
    serde_json::from_str(raw).expect("command output should be JSON")
}

/// Serializes env mutation across tests; command config loading reads
/// process-wide variables.
fn with_env(vars: &[(&str, &str)], test: impl FnOnce()) {
    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    let _lock = GUARD.get_or_init(|| Mutex::new(())).lock().expect("env guard");

    let managed = ["SOIREE_LOG_LEVEL", "SOIREE_BUDGET_TOLERANCE", "SOIREE_CONFIG"];
    let saved: Vec<(String, Option<String>)> =
        managed.iter().map(|key| ((*key).to_owned(), env::var(*key).ok())).collect();
    for key in managed {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test();

    for (key, value) in saved {
        match value {
            Some(value) => env::set_var(&key, value),
            None => env::remove_var(&key),
        }
    }
}
