use serde::{Deserialize, Serialize};

/// Priority class drives nothing numeric; it records which themes the
/// marketplace fronts on landing pages and seasonal campaigns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePriority {
    Flagship,
    Standard,
    Seasonal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeDefinition {
    pub id: &'static str,
    pub display_name: &'static str,
    pub palette: &'static [&'static str],
    pub priority: ThemePriority,
}

const THEMES: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "princess",
        display_name: "Princess",
        palette: &["#f8c8dc", "#e6a8d7", "#fff4e6"],
        priority: ThemePriority::Flagship,
    },
    ThemeDefinition {
        id: "superhero",
        display_name: "Superhero",
        palette: &["#d7263d", "#1b4d89", "#f4d35e"],
        priority: ThemePriority::Flagship,
    },
    ThemeDefinition {
        id: "dinosaur",
        display_name: "Dinosaur",
        palette: &["#4c7a34", "#8a5a2b", "#d9cab3"],
        priority: ThemePriority::Flagship,
    },
    ThemeDefinition {
        id: "unicorn",
        display_name: "Unicorn",
        palette: &["#c3aed6", "#ffd1dc", "#bdfcc9"],
        priority: ThemePriority::Standard,
    },
    ThemeDefinition {
        id: "pirate",
        display_name: "Pirate",
        palette: &["#1f1f1f", "#b02e0c", "#e0c879"],
        priority: ThemePriority::Standard,
    },
    ThemeDefinition {
        id: "space",
        display_name: "Space",
        palette: &["#0b1d51", "#5d54a4", "#c0c0c0"],
        priority: ThemePriority::Standard,
    },
    ThemeDefinition {
        id: "football",
        display_name: "Football",
        palette: &["#2e7d32", "#ffffff", "#111111"],
        priority: ThemePriority::Standard,
    },
    ThemeDefinition {
        id: "jungle",
        display_name: "Jungle",
        palette: &["#2f5233", "#a4c639", "#8a5a2b"],
        priority: ThemePriority::Standard,
    },
    ThemeDefinition {
        id: "mermaid",
        display_name: "Mermaid",
        palette: &["#20b2aa", "#9370db", "#f0f8ff"],
        priority: ThemePriority::Standard,
    },
    ThemeDefinition {
        id: "halloween",
        display_name: "Halloween",
        palette: &["#ff7518", "#1f1f1f", "#6a0dad"],
        priority: ThemePriority::Seasonal,
    },
    ThemeDefinition {
        id: "christmas",
        display_name: "Christmas",
        palette: &["#b3000c", "#0f5132", "#f5f5dc"],
        priority: ThemePriority::Seasonal,
    },
    ThemeDefinition {
        id: "general",
        display_name: "General Celebration",
        palette: &["#f5f5f5", "#ffd700", "#87ceeb"],
        priority: ThemePriority::Standard,
    },
];

/// Static theme table. Pure data; unknown theme ids are legal inputs to
/// the engine (a brief may name a theme no supplier has heard of).
pub struct ThemeCatalog;

impl ThemeCatalog {
    pub fn all() -> &'static [ThemeDefinition] {
        THEMES
    }

    pub fn lookup(theme_id: &str) -> Option<&'static ThemeDefinition> {
        THEMES.iter().find(|theme| theme.id.eq_ignore_ascii_case(theme_id))
    }

    pub fn is_known(theme_id: &str) -> bool {
        Self::lookup(theme_id).is_some()
    }
}
