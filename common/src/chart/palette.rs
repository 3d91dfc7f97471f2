//! Colors and rendering options passed explicitly into every render call.

use crate::model::dashboard::DashboardPreferences;
use crate::model::widget_config::WidgetConfig;
use serde::{Deserialize, Serialize};

/// Default series palette.
pub const DEFAULT_COLORS: [&str; 8] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#06b6d4", "#84cc16",
];

/// Gauge band colors, low to high.
pub const GAUGE_RED: &str = "#ef4444";
pub const GAUGE_AMBER: &str = "#f59e0b";
pub const GAUGE_GREEN: &str = "#22c55e";
/// Unfilled remainder of a gauge arc.
pub const GAUGE_TRACK: &str = "#e5e7eb";

/// An ordered, never-empty list of CSS colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Builds a palette, falling back to [`DEFAULT_COLORS`] when `colors`
    /// has no usable entries.
    pub fn new(colors: Vec<String>) -> Self {
        let colors: Vec<String> = colors
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Color for item `index`, wrapping around the palette.
    pub fn color_at(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    /// The palette a widget renders with: its own `colors` when set and
    /// non-empty, otherwise `self`.
    pub fn for_config(&self, config: &WidgetConfig) -> Palette {
        match &config.colors {
            Some(colors) if colors.iter().any(|c| !c.trim().is_empty()) => {
                Palette::new(colors.clone())
            }
            _ => self.clone(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl From<Vec<String>> for Palette {
    fn from(colors: Vec<String>) -> Self {
        Palette::new(colors)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

/// How tooltips are produced for a rendered widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TooltipMode {
    /// The drawing backend shows the hovered row's label and value.
    #[default]
    Static,
    /// Tooltip content comes from the interactive (AI) tooltip hook.
    Interactive,
}

/// Theme-level inputs of a render call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub palette: Palette,
    pub tooltip: TooltipMode,
}

impl RenderOptions {
    /// Options derived from a dashboard's stored preferences.
    pub fn from_preferences(preferences: &DashboardPreferences) -> Self {
        let palette = preferences
            .color_preset
            .clone()
            .map(Palette::new)
            .unwrap_or_default();
        Self {
            palette,
            tooltip: TooltipMode::Static,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_index_wraps_around() {
        let palette = Palette::new(
            ["a", "b", "c", "d", "e"].iter().map(|c| c.to_string()).collect(),
        );
        let picked: Vec<&str> = (0..7).map(|i| palette.color_at(i)).collect();
        assert_eq!(picked, vec!["a", "b", "c", "d", "e", "a", "b"]);
    }

    #[test]
    fn empty_palettes_fall_back_to_defaults() {
        assert_eq!(Palette::new(vec![" ".into()]), Palette::default());
        let config = WidgetConfig {
            colors: Some(Vec::new()),
            ..WidgetConfig::default()
        };
        assert_eq!(Palette::default().for_config(&config), Palette::default());
    }

    #[test]
    fn widget_colors_override_the_theme() {
        let config = WidgetConfig {
            colors: Some(vec!["#000".into()]),
            ..WidgetConfig::default()
        };
        let palette = Palette::default().for_config(&config);
        assert_eq!(palette.colors(), &["#000".to_string()]);
    }
}
