use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine tuning constants. The defaults are load-bearing: planning
/// runs must stay reproducible across releases, so they change only
/// deliberately. Overrides exist for experiments and synthetic test
/// geographies, not for production tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub selection: SelectionWeights,
    pub theme: ThemeWeights,
    pub replacement: ReplacementWeights,
    pub logging: LoggingConfig,
}

/// Composite-score adjustments and the budget filter used by the
/// category selector.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionWeights {
    /// Price filter multiplier: `price_from <= category_budget * tolerance`.
    pub budget_tolerance: Decimal,
    /// Available with high confidence.
    pub availability_high: f64,
    /// Available with low or medium confidence.
    pub availability_low: f64,
    /// Not available on the requested date/slot.
    pub availability_unavailable: f64,
    /// Location served with high confidence.
    pub location_high: f64,
    /// Location served with low or medium confidence.
    pub location_low: f64,
    /// Location out of range.
    pub location_unserved: f64,
}

/// Theme affinity scoring weights.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeWeights {
    pub base: f64,
    pub exact_match: f64,
    pub service_match: f64,
    pub name_mention: f64,
    pub description_mention: f64,
    /// No-theme brief, supplier carries no themes at all.
    pub unthemed_bonus: f64,
    /// No-theme brief, supplier explicitly lists "general".
    pub general_bonus: f64,
    pub rating_multiplier: f64,
}

/// Replacement-ranking weights and the dominant-reason threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplacementWeights {
    pub baseline: f64,
    pub rating_step: f64,
    pub savings_divisor: f64,
    pub savings_cap: f64,
    pub price_match_bonus: f64,
    pub theme_match_bonus: f64,
    pub review_divisor: f64,
    pub review_cap: f64,
    pub premium_bonus: f64,
    pub response_bonus: f64,
    /// Rating delta above which "better_reviews" becomes the reason.
    pub rating_reason_threshold: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            selection: SelectionWeights {
                budget_tolerance: Decimal::new(13, 1),
                availability_high: 25.0,
                availability_low: 10.0,
                availability_unavailable: -30.0,
                location_high: 15.0,
                location_low: 5.0,
                location_unserved: -20.0,
            },
            theme: ThemeWeights {
                base: 50.0,
                exact_match: 50.0,
                service_match: 30.0,
                name_mention: 20.0,
                description_mention: 10.0,
                unthemed_bonus: 30.0,
                general_bonus: 40.0,
                rating_multiplier: 2.0,
            },
            replacement: ReplacementWeights {
                baseline: 10.0,
                rating_step: 10.0,
                savings_divisor: 10.0,
                savings_cap: 20.0,
                price_match_bonus: 10.0,
                theme_match_bonus: 25.0,
                review_divisor: 10.0,
                review_cap: 15.0,
                premium_bonus: 15.0,
                response_bonus: 10.0,
                rating_reason_threshold: 0.3,
            },
            logging: LoggingConfig { level: "info".to_owned() },
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

/// Optional TOML patch applied on top of the reference defaults.
#[derive(Debug, Default, Deserialize, Serialize)]
struct ConfigPatch {
    selection: Option<SelectionPatch>,
    theme: Option<ThemePatch>,
    replacement: Option<ReplacementPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct SelectionPatch {
    budget_tolerance: Option<f64>,
    availability_high: Option<f64>,
    availability_low: Option<f64>,
    availability_unavailable: Option<f64>,
    location_high: Option<f64>,
    location_low: Option<f64>,
    location_unserved: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct ThemePatch {
    base: Option<f64>,
    exact_match: Option<f64>,
    service_match: Option<f64>,
    name_mention: Option<f64>,
    description_mention: Option<f64>,
    unthemed_bonus: Option<f64>,
    general_bonus: Option<f64>,
    rating_multiplier: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct ReplacementPatch {
    baseline: Option<f64>,
    rating_step: Option<f64>,
    savings_divisor: Option<f64>,
    savings_cap: Option<f64>,
    price_match_bonus: Option<f64>,
    theme_match_bonus: Option<f64>,
    review_divisor: Option<f64>,
    review_cap: Option<f64>,
    premium_bonus: Option<f64>,
    response_bonus: Option<f64>,
    rating_reason_threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct LoggingPatch {
    level: Option<String>,
}

impl EngineConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("soiree.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(selection) = patch.selection {
            if let Some(tolerance) = selection.budget_tolerance {
                if let Some(decimal) = Decimal::from_f64_retain(tolerance) {
                    self.selection.budget_tolerance = decimal;
                }
            }
            apply_f64(&mut self.selection.availability_high, selection.availability_high);
            apply_f64(&mut self.selection.availability_low, selection.availability_low);
            apply_f64(
                &mut self.selection.availability_unavailable,
                selection.availability_unavailable,
            );
            apply_f64(&mut self.selection.location_high, selection.location_high);
            apply_f64(&mut self.selection.location_low, selection.location_low);
            apply_f64(&mut self.selection.location_unserved, selection.location_unserved);
        }

        if let Some(theme) = patch.theme {
            apply_f64(&mut self.theme.base, theme.base);
            apply_f64(&mut self.theme.exact_match, theme.exact_match);
            apply_f64(&mut self.theme.service_match, theme.service_match);
            apply_f64(&mut self.theme.name_mention, theme.name_mention);
            apply_f64(&mut self.theme.description_mention, theme.description_mention);
            apply_f64(&mut self.theme.unthemed_bonus, theme.unthemed_bonus);
            apply_f64(&mut self.theme.general_bonus, theme.general_bonus);
            apply_f64(&mut self.theme.rating_multiplier, theme.rating_multiplier);
        }

        if let Some(replacement) = patch.replacement {
            apply_f64(&mut self.replacement.baseline, replacement.baseline);
            apply_f64(&mut self.replacement.rating_step, replacement.rating_step);
            apply_f64(&mut self.replacement.savings_divisor, replacement.savings_divisor);
            apply_f64(&mut self.replacement.savings_cap, replacement.savings_cap);
            apply_f64(&mut self.replacement.price_match_bonus, replacement.price_match_bonus);
            apply_f64(&mut self.replacement.theme_match_bonus, replacement.theme_match_bonus);
            apply_f64(&mut self.replacement.review_divisor, replacement.review_divisor);
            apply_f64(&mut self.replacement.review_cap, replacement.review_cap);
            apply_f64(&mut self.replacement.premium_bonus, replacement.premium_bonus);
            apply_f64(&mut self.replacement.response_bonus, replacement.response_bonus);
            apply_f64(
                &mut self.replacement.rating_reason_threshold,
                replacement.rating_reason_threshold,
            );
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(level) = env::var("SOIREE_LOG_LEVEL") {
            if !level.trim().is_empty() {
                self.logging.level = level;
            }
        }

        if let Ok(raw) = env::var("SOIREE_BUDGET_TOLERANCE") {
            let parsed: Decimal = raw.trim().parse().map_err(|_| {
                ConfigError::InvalidEnvOverride {
                    key: "SOIREE_BUDGET_TOLERANCE".to_owned(),
                    value: raw.clone(),
                }
            })?;
            self.selection.budget_tolerance = parsed;
        }

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.selection.budget_tolerance < Decimal::ONE {
            return Err(ConfigError::Validation(
                "budget_tolerance must be at least 1.0".to_owned(),
            ));
        }
        if self.theme.base < 0.0 {
            return Err(ConfigError::Validation("theme base score must be non-negative".to_owned()));
        }
        if self.replacement.savings_divisor <= 0.0 || self.replacement.review_divisor <= 0.0 {
            return Err(ConfigError::Validation(
                "replacement divisors must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

fn apply_f64(target: &mut f64, value: Option<f64>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }
    if let Ok(from_env) = env::var("SOIREE_CONFIG") {
        let path = PathBuf::from(from_env);
        if path.exists() {
            return Some(path);
        }
    }
    let default = PathBuf::from("soiree.toml");
    default.exists().then_some(default)
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_carry_the_shipping_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.selection.budget_tolerance, Decimal::new(13, 1));
        assert_eq!(config.selection.availability_high, 25.0);
        assert_eq!(config.selection.location_unserved, -20.0);
        assert_eq!(config.theme.base, 50.0);
        assert_eq!(config.replacement.rating_reason_threshold, 0.3);
    }

    #[test]
    fn toml_patch_overrides_single_fields_only() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[theme]\nname_mention = 35.0").expect("write");

        let config = EngineConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
        })
        .expect("load");

        assert_eq!(config.theme.name_mention, 35.0);
        assert_eq!(config.theme.exact_match, 50.0);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = EngineConfig::load(LoadOptions {
            config_path: Some(PathBuf::from("/nonexistent/soiree.toml")),
            require_file: true,
        });
        assert!(matches!(result, Err(ConfigError::MissingConfigFile(_))));
    }

    #[test]
    fn tolerance_below_one_fails_validation() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[selection]\nbudget_tolerance = 0.5").expect("write");

        let result = EngineConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
        });
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
