use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::html::is_safe_color;

const DEFAULT_BACKGROUND: &str = "#f0f0f0";
const DEFAULT_PRIMARY: &str = "#1a1a1a";
const DEFAULT_ACCENT: &str = "#4f6ef7";

const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("classic", include_str!("../themes/classic.toml")),
    ("forest", include_str!("../themes/forest.toml")),
    ("midnight", include_str!("../themes/midnight.toml")),
    ("ocean", include_str!("../themes/ocean.toml")),
    ("rose_gold", include_str!("../themes/rose_gold.toml")),
    ("sunset", include_str!("../themes/sunset.toml")),
];

/// Color overrides as they arrive with a document: token name to color.
pub type ThemeMap = BTreeMap<String, String>;

/// The three color tokens every block renderer reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: String,
    pub primary: String,
    pub accent: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            primary: DEFAULT_PRIMARY.to_string(),
            accent: DEFAULT_ACCENT.to_string(),
        }
    }
}

impl Palette {
    /// Each recognized token present in `theme` overrides only itself.
    pub fn resolve(theme: Option<&ThemeMap>) -> Self {
        let mut palette = Self::default();
        let Some(theme) = theme else {
            return palette;
        };

        if let Some(v) = theme.get("background") {
            palette.background = v.clone();
        }
        if let Some(v) = theme.get("primary") {
            palette.primary = v.clone();
        }
        if let Some(v) = theme.get("accent") {
            palette.accent = v.clone();
        }
        palette
    }

    /// Replaces tokens that are not CSS-color-safe with the defaults.
    pub fn sanitized(self) -> Self {
        let keep = |value: String, fallback: &str| {
            if is_safe_color(&value) {
                value
            } else {
                fallback.to_string()
            }
        };

        Self {
            background: keep(self.background, DEFAULT_BACKGROUND),
            primary: keep(self.primary, DEFAULT_PRIMARY),
            accent: keep(self.accent, DEFAULT_ACCENT),
        }
    }
}

/// A named color preset, loadable from TOML or YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_accent")]
    pub accent: String,
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}
fn default_primary() -> String {
    DEFAULT_PRIMARY.to_string()
}
fn default_accent() -> String {
    DEFAULT_ACCENT.to_string()
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "classic".to_string(),
            background: default_background(),
            primary: default_primary(),
            accent: default_accent(),
        }
    }
}

impl Theme {
    pub fn from_builtin(name: &str) -> Result<Self, String> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        let content = BUILTIN_THEMES
            .iter()
            .find(|(n, _)| *n == normalized)
            .map(|(_, c)| *c)
            .ok_or_else(|| {
                format!(
                    "Unknown built-in theme '{}'. Available: {}",
                    name,
                    Self::list_builtins().join(", ")
                )
            })?;
        Self::from_toml(content)
    }

    pub fn list_builtins() -> Vec<&'static str> {
        BUILTIN_THEMES.iter().map(|(n, _)| *n).collect()
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| format!("Failed to parse theme YAML: {}", e))
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse theme TOML: {}", e))
    }

    pub fn to_map(&self) -> ThemeMap {
        ThemeMap::from([
            ("background".to_string(), self.background.clone()),
            ("primary".to_string(), self.primary.clone()),
            ("accent".to_string(), self.accent.clone()),
        ])
    }

    /// Layers a document's own overrides on top of this preset.
    pub fn merged_with(&self, overrides: Option<&ThemeMap>) -> ThemeMap {
        let mut map = self.to_map();
        if let Some(overrides) = overrides {
            map.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::{Palette, Theme, ThemeMap};

    #[test]
    fn from_builtin_accepts_hyphenated_and_case_insensitive_names() {
        let lower = Theme::from_builtin("midnight").expect("lowercase variant");
        let upper = Theme::from_builtin(" MidNight ").expect("mixed case variant");
        assert_eq!(lower.background, upper.background);
        assert_eq!(lower.accent, upper.accent);

        let underscored = Theme::from_builtin("rose_gold").expect("underscore variant");
        let hyphenated = Theme::from_builtin("Rose-Gold").expect("hyphenated variant");
        assert_eq!(hyphenated.name, "rose_gold");
        assert_eq!(underscored.accent, hyphenated.accent);

        assert!(Theme::from_builtin("no-such-theme").is_err());
    }

    #[test]
    fn every_builtin_parses() {
        for name in Theme::list_builtins() {
            let theme = Theme::from_builtin(name).expect("builtin must parse");
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn missing_theme_uses_defaults() {
        let palette = Palette::resolve(None);
        assert_eq!(palette.background, "#f0f0f0");
        assert_eq!(palette.primary, "#1a1a1a");
        assert_eq!(palette.accent, "#4f6ef7");
    }

    #[test]
    fn overrides_are_field_local() {
        let theme = ThemeMap::from([
            ("accent".to_string(), "#ff0000".to_string()),
            ("unknown".to_string(), "#00ff00".to_string()),
        ]);
        let palette = Palette::resolve(Some(&theme));

        assert_eq!(palette.accent, "#ff0000");
        assert_eq!(palette.background, "#f0f0f0");
        assert_eq!(palette.primary, "#1a1a1a");
    }

    #[test]
    fn colors_pass_through_verbatim_until_sanitized() {
        let theme = ThemeMap::from([("primary".to_string(), "red;x:y".to_string())]);
        let palette = Palette::resolve(Some(&theme));
        assert_eq!(palette.primary, "red;x:y");
        assert_eq!(palette.sanitized().primary, "#1a1a1a");
    }

    #[test]
    fn yaml_theme_fills_missing_tokens() {
        let theme = Theme::from_yaml("accent: \"#123456\"\n").expect("valid yaml");
        assert_eq!(theme.accent, "#123456");
        assert_eq!(theme.background, "#f0f0f0");
    }

    #[test]
    fn document_overrides_win_over_preset() {
        let preset = Theme::from_builtin("forest").expect("forest");
        let overrides = ThemeMap::from([("accent".to_string(), "#000000".to_string())]);
        let merged = preset.merged_with(Some(&overrides));

        assert_eq!(merged["accent"], "#000000");
        assert_eq!(merged["background"], preset.background);
    }
}
