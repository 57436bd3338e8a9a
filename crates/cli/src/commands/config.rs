use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use soiree_core::config::{EngineConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match EngineConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let fields: Vec<(&str, String, Option<&str>)> = vec![
        (
            "selection.budget_tolerance",
            config.selection.budget_tolerance.to_string(),
            Some("SOIREE_BUDGET_TOLERANCE"),
        ),
        ("selection.availability_high", config.selection.availability_high.to_string(), None),
        ("selection.availability_low", config.selection.availability_low.to_string(), None),
        (
            "selection.availability_unavailable",
            config.selection.availability_unavailable.to_string(),
            None,
        ),
        ("selection.location_high", config.selection.location_high.to_string(), None),
        ("selection.location_low", config.selection.location_low.to_string(), None),
        ("selection.location_unserved", config.selection.location_unserved.to_string(), None),
        ("theme.base", config.theme.base.to_string(), None),
        ("theme.exact_match", config.theme.exact_match.to_string(), None),
        ("theme.service_match", config.theme.service_match.to_string(), None),
        ("theme.name_mention", config.theme.name_mention.to_string(), None),
        ("theme.description_mention", config.theme.description_mention.to_string(), None),
        ("theme.unthemed_bonus", config.theme.unthemed_bonus.to_string(), None),
        ("theme.general_bonus", config.theme.general_bonus.to_string(), None),
        ("theme.rating_multiplier", config.theme.rating_multiplier.to_string(), None),
        ("replacement.baseline", config.replacement.baseline.to_string(), None),
        ("replacement.rating_step", config.replacement.rating_step.to_string(), None),
        ("replacement.savings_divisor", config.replacement.savings_divisor.to_string(), None),
        ("replacement.savings_cap", config.replacement.savings_cap.to_string(), None),
        ("replacement.price_match_bonus", config.replacement.price_match_bonus.to_string(), None),
        ("replacement.theme_match_bonus", config.replacement.theme_match_bonus.to_string(), None),
        ("replacement.review_divisor", config.replacement.review_divisor.to_string(), None),
        ("replacement.review_cap", config.replacement.review_cap.to_string(), None),
        ("replacement.premium_bonus", config.replacement.premium_bonus.to_string(), None),
        ("replacement.response_bonus", config.replacement.response_bonus.to_string(), None),
        (
            "replacement.rating_reason_threshold",
            config.replacement.rating_reason_threshold.to_string(),
            None,
        ),
        ("logging.level", config.logging.level.clone(), Some("SOIREE_LOG_LEVEL")),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key, value, env_key) in fields {
        lines.push(render_line(
            key,
            &value,
            field_source(key, env_key, config_file_doc.as_ref(), config_file_path.as_deref()),
        ));
    }

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    if let Ok(from_env) = env::var("SOIREE_CONFIG") {
        let path = PathBuf::from(from_env);
        if path.exists() {
            return Some(path);
        }
    }

    let root = PathBuf::from("soiree.toml");
    if root.exists() {
        return Some(root);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: Option<&str>,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
