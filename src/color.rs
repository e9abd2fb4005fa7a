//! Level → color mapping owned by a single transport instance.

use colored::Color;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::ConfigError;

/// Default colors for the three levels the host logger ships with.
pub fn default_colors() -> BTreeMap<String, String> {
    [("info", "green"), ("warning", "yellow"), ("error", "red")]
        .into_iter()
        .map(|(level, color)| (level.to_string(), color.to_string()))
        .collect()
}

/// Resolved palette: the configured color name per level together with the
/// terminal color it maps to.
#[derive(Debug, Clone, Default)]
pub struct LevelColors {
    colors: BTreeMap<String, (String, Color)>,
}

impl LevelColors {
    /// Resolve color names. Empty names mean "no color for this level".
    pub fn from_names(names: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut colors = BTreeMap::new();
        for (level, name) in names {
            if name.is_empty() {
                continue;
            }
            let color = Color::from_str(name).map_err(|_| ConfigError::UnknownColor {
                level: level.clone(),
                color: name.clone(),
            })?;
            colors.insert(level.clone(), (name.clone(), color));
        }
        Ok(LevelColors { colors })
    }

    /// Configured color name for `level`.
    pub fn name(&self, level: &str) -> Option<&str> {
        self.colors.get(level).map(|(name, _)| name.as_str())
    }

    /// Wrap `text` in the ANSI foreground sequence of `level`'s color.
    ///
    /// Escape codes are always emitted: the output goes to a file, so the
    /// terminal detection done by `colored`'s own `Display` does not apply.
    pub fn paint(&self, level: &str, text: &str) -> Option<String> {
        self.colors
            .get(level)
            .map(|(_, color)| format!("\x1b[{}m{}\x1b[0m", color.to_fg_str(), text))
    }
}
