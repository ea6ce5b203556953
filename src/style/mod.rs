//! # Style Presets
//!
//! A style preset is a small, immutable record of colors plus a rendering
//! flag. Presets are looked up by id from a [`StyleRegistry`].
//!
//! ## Built-in Presets
//!
//! | Id | Background | Modules | Accent | Dots |
//! |----|------------|---------|--------|------|
//! | `slate-ember` | `#000000` | `#e2e8f0` | `#f97316` | circles |
//!
//! ## Adding a Preset
//!
//! Either add it to [`builtin_presets`], or load a JSON array at runtime
//! with [`StyleRegistry::with_json`]:
//!
//! ```
//! use dotqr::style::StyleRegistry;
//!
//! let registry = StyleRegistry::with_json(r##"[{
//!     "id": "paper",
//!     "name": "Paper",
//!     "background_color": "#ffffff",
//!     "module_color": "#111111",
//!     "accent_color": "#2563eb"
//! }]"##).unwrap();
//!
//! assert!(registry.lookup("paper").is_ok());
//! assert!(registry.lookup("slate-ember").is_ok());
//! ```

mod color;

pub use color::Color;

use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Style used when none is given.
pub const DEFAULT_STYLE: &str = "slate-ember";

/// How ordinary (non-corner) modules are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotStyle {
    /// Filled circle centred in each sampled cell.
    #[default]
    Dots,
    /// The whole sampled cell.
    Squares,
}

/// A named color scheme for stylized QR output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePreset {
    pub id: String,
    /// Display name
    pub name: String,
    pub background_color: Color,
    /// Dark-module color (also the SVG foreground)
    pub module_color: Color,
    /// Finder-corner color (PNG only)
    pub accent_color: Color,
    #[serde(default)]
    pub dot_style: DotStyle,
}

/// Presets compiled into the binary.
pub fn builtin_presets() -> Vec<StylePreset> {
    vec![StylePreset {
        id: "slate-ember".to_string(),
        name: "Slate Ember".to_string(),
        background_color: Color::rgb(0x00, 0x00, 0x00),
        module_color: Color::rgb(0xe2, 0xe8, 0xf0),
        accent_color: Color::rgb(0xf9, 0x73, 0x16),
        dot_style: DotStyle::Dots,
    }]
}

/// Read-only id → preset table.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    presets: Vec<StylePreset>,
}

impl StyleRegistry {
    /// Build a registry, rejecting duplicate or empty ids.
    pub fn new(presets: Vec<StylePreset>) -> Result<Self, GenerationError> {
        for (i, preset) in presets.iter().enumerate() {
            if preset.id.trim().is_empty() {
                return Err(GenerationError::Config("style preset with empty id".into()));
            }
            if presets[..i]
                .iter()
                .any(|p| p.id.eq_ignore_ascii_case(&preset.id))
            {
                return Err(GenerationError::Config(format!(
                    "duplicate style id '{}'",
                    preset.id
                )));
            }
        }
        Ok(Self { presets })
    }

    /// The process-wide registry of built-in presets, created on first use.
    pub fn builtin() -> &'static StyleRegistry {
        static BUILTIN: OnceLock<StyleRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| Self {
            presets: builtin_presets(),
        })
    }

    /// Built-ins extended with presets parsed from a JSON array.
    pub fn with_json(json: &str) -> Result<Self, GenerationError> {
        let extra: Vec<StylePreset> = serde_json::from_str(json)
            .map_err(|e| GenerationError::Config(format!("invalid style presets: {}", e)))?;
        let mut presets = builtin_presets();
        presets.extend(extra);
        Self::new(presets)
    }

    /// Get a preset by id (case insensitive).
    pub fn lookup(&self, id: &str) -> Result<&StylePreset, GenerationError> {
        self.presets
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| GenerationError::UnknownStyle(id.to_string()))
    }

    /// Preset ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.id.as_str())
    }

    pub fn presets(&self) -> &[StylePreset] {
        &self.presets
    }
}

/// Look up a built-in preset.
pub fn lookup(id: &str) -> Result<&'static StylePreset, GenerationError> {
    StyleRegistry::builtin().lookup(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slate_ember() {
        let style = lookup("slate-ember").unwrap();
        assert_eq!(style.name, "Slate Ember");
        assert_eq!(style.background_color.to_hex(), "#000000");
        assert_eq!(style.module_color.to_hex(), "#e2e8f0");
        assert_eq!(style.accent_color.to_hex(), "#f97316");
        assert_eq!(style.dot_style, DotStyle::Dots);
    }

    #[test]
    fn test_lookup() {
        assert!(lookup(DEFAULT_STYLE).is_ok());
        assert!(lookup("SLATE-EMBER").is_ok()); // Case insensitive
        assert!(matches!(
            lookup("unknown"),
            Err(GenerationError::UnknownStyle(id)) if id == "unknown"
        ));
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(StyleRegistry::builtin(), StyleRegistry::builtin()));
        assert_eq!(StyleRegistry::builtin().ids().collect::<Vec<_>>(), vec!["slate-ember"]);
    }

    #[test]
    fn test_with_json() {
        let registry = StyleRegistry::with_json(
            r##"[{"id": "mono", "name": "Mono", "background_color": "#fff",
                  "module_color": "#000", "accent_color": "#333", "dot_style": "squares"}]"##,
        )
        .unwrap();
        let mono = registry.lookup("mono").unwrap();
        assert_eq!(mono.background_color, Color::WHITE);
        assert_eq!(mono.dot_style, DotStyle::Squares);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["slate-ember", "mono"]);
    }

    #[test]
    fn test_dot_style_defaults_to_dots() {
        let registry = StyleRegistry::with_json(
            r##"[{"id": "x", "name": "X", "background_color": "#fff",
                  "module_color": "#000", "accent_color": "#333"}]"##,
        )
        .unwrap();
        assert_eq!(registry.lookup("x").unwrap().dot_style, DotStyle::Dots);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = StyleRegistry::with_json(
            r##"[{"id": "Slate-Ember", "name": "Again", "background_color": "#fff",
                  "module_color": "#000", "accent_color": "#333"}]"##,
        );
        assert!(matches!(result, Err(GenerationError::Config(_))));
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(matches!(
            StyleRegistry::with_json("{"),
            Err(GenerationError::Config(_))
        ));
        assert!(StyleRegistry::with_json(
            r##"[{"id": "x", "name": "X", "background_color": "red",
                  "module_color": "#000", "accent_color": "#333"}]"##,
        )
        .is_err());
    }
}
