//! Style sheets for the rendered document.
//!
//! The `theme` setting names a palette; the `mode` setting picks its light or
//! dark variant. Built-in themes live here. Custom ones are JSON files in the
//! themes directory, in the format the theme editor exports:
//!
//! ```json
//! {
//!   "name": "forest",
//!   "colors": { "background": "#0f1a14", "panel": "#16261d", "text": "#c9d8cf",
//!               "accent": "#6fcf97", "border": "#24382c" },
//!   "light_colors": { ... },
//!   "font": { "family": "Inter", "size": "15px" }
//! }
//! ```
//!
//! Resolution never fails: an unknown name, an unreadable file, or a value
//! that is not a plain CSS token falls back to the built-in default.

use crate::config::{Mode, Settings};
use crate::error::{NoteError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_THEME: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: String,
    pub panel: String,
    pub text: String,
    pub accent: String,
    pub border: String,
    /// Secondary text (blockquotes). Falls back to `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<String>,
}

impl Palette {
    fn new(background: &str, panel: &str, text: &str, accent: &str, border: &str, muted: &str) -> Self {
        Self {
            background: background.to_string(),
            panel: panel.to_string(),
            text: text.to_string(),
            accent: accent.to_string(),
            border: border.to_string(),
            muted: Some(muted.to_string()),
        }
    }

    pub fn muted(&self) -> &str {
        self.muted.as_deref().unwrap_or(&self.text)
    }

    fn values(&self) -> impl Iterator<Item = &str> {
        [
            self.background.as_str(),
            self.panel.as_str(),
            self.text.as_str(),
            self.accent.as_str(),
            self.border.as_str(),
            self.muted(),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: String,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "'Segoe UI', Tahoma, Geneva, Verdana, sans-serif".to_string(),
            size: "16px".to_string(),
        }
    }
}

/// On-disk theme definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeFile {
    pub name: String,
    pub colors: Palette,
    #[serde(default)]
    pub light_colors: Option<Palette>,
    #[serde(default)]
    pub font: Option<Font>,
}

impl ThemeFile {
    fn variant(&self, mode: Mode) -> &Palette {
        match mode {
            Mode::Dark => &self.colors,
            Mode::Light => self.light_colors.as_ref().unwrap_or(&self.colors),
        }
    }
}

struct BuiltinTheme {
    name: &'static str,
    dark: Palette,
    light: Palette,
}

static BUILTIN_THEMES: Lazy<Vec<BuiltinTheme>> = Lazy::new(|| {
    vec![
        BuiltinTheme {
            name: DEFAULT_THEME,
            dark: Palette::new("#1a1b26", "#24283b", "#a9b1d6", "#7aa2f7", "#292e42", "#565f89"),
            light: Palette::new("#f5f5f7", "#e4e6ee", "#343b58", "#34548a", "#c4c8da", "#6c6e75"),
        },
        BuiltinTheme {
            name: "paper",
            dark: Palette::new("#1e1e1e", "#2a2a2a", "#d4d4d4", "#78aeed", "#3c3c3c", "#9a9a9a"),
            light: Palette::new("#fafafa", "#f0f0f0", "#2e2e2e", "#1c71d8", "#d5d5d5", "#6a6a6a"),
        },
    ]
});

/// Names of the themes that ship with the crate.
pub fn builtin_theme_names() -> Vec<&'static str> {
    BUILTIN_THEMES.iter().map(|t| t.name).collect()
}

/// A resolved palette + font, ready to be embedded in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub palette: Palette,
    pub font: Font,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::builtin(DEFAULT_THEME, Mode::Dark).unwrap_or_else(|| Self {
            palette: BUILTIN_THEMES[0].dark.clone(),
            font: Font::default(),
        })
    }
}

impl Stylesheet {
    pub fn builtin(name: &str, mode: Mode) -> Option<Self> {
        let theme = BUILTIN_THEMES.iter().find(|t| t.name == name)?;
        let palette = match mode {
            Mode::Dark => theme.dark.clone(),
            Mode::Light => theme.light.clone(),
        };
        Some(Self {
            palette,
            font: Font::default(),
        })
    }

    /// The `<style>` body.
    pub fn css(&self) -> String {
        let p = &self.palette;
        format!(
            "body {{ background-color: {bg}; color: {text}; font-family: {family}; font-size: {size}; padding: 40px; line-height: 1.6; }}
h1, h2, h3 {{ color: {accent}; border-bottom: 1px solid {border}; padding-bottom: 10px; }}
a {{ color: {accent}; }}
code {{ background-color: {panel}; padding: 2px 4px; border-radius: 4px; font-family: 'Consolas', monospace; }}
pre {{ background-color: {panel}; padding: 15px; border-radius: 8px; overflow-x: auto; }}
pre code {{ padding: 0; }}
blockquote {{ border-left: 4px solid {accent}; margin-left: 0; padding-left: 20px; color: {muted}; font-style: italic; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid {border}; padding: 8px; text-align: left; }}
th {{ background-color: {panel}; }}",
            bg = p.background,
            text = p.text,
            family = self.font.family,
            size = self.font.size,
            accent = p.accent,
            border = p.border,
            panel = p.panel,
            muted = p.muted(),
        )
    }

    fn is_safe(&self) -> bool {
        self.palette
            .values()
            .chain([self.font.family.as_str(), self.font.size.as_str()])
            .all(is_plain_css_value)
    }
}

/// A value may not close the declaration, the rule, or the `<style>` element.
fn is_plain_css_value(value: &str) -> bool {
    !value.trim().is_empty()
        && !value
            .chars()
            .any(|c| matches!(c, ';' | '{' | '}' | '<' | '>' | '\\' | '@') || c.is_control())
}

/// Looks up theme names among the built-ins and the custom themes directory.
#[derive(Debug, Clone, Default)]
pub struct ThemeCatalog {
    themes_dir: Option<PathBuf>,
}

impl ThemeCatalog {
    pub fn new(themes_dir: PathBuf) -> Self {
        Self {
            themes_dir: Some(themes_dir),
        }
    }

    /// Catalog with only the built-in themes.
    pub fn builtin_only() -> Self {
        Self::default()
    }

    /// Built-in names followed by custom theme file stems.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = builtin_theme_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        if let Some(dir) = &self.themes_dir {
            if let Ok(entries) = fs::read_dir(dir) {
                let mut custom: Vec<String> = entries
                    .flatten()
                    .map(|e| e.path())
                    .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                    .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
                    .filter(|n| !names.contains(n))
                    .collect();
                custom.sort();
                names.extend(custom);
            }
        }
        names
    }

    /// Read a custom theme file.
    pub fn load_file(&self, name: &str) -> Result<ThemeFile> {
        let dir = self
            .themes_dir
            .as_ref()
            .ok_or_else(|| NoteError::Api("No themes directory configured".to_string()))?;
        let path = theme_path(dir, name)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(NoteError::Api(format!("Unknown theme: {}", name)));
            }
            Err(err) => return Err(NoteError::Io(err)),
        };
        let theme: ThemeFile = serde_json::from_str(&content).map_err(NoteError::Serialization)?;
        Ok(theme)
    }

    /// Style sheet for the configured theme and mode.
    pub fn resolve(&self, settings: &Settings) -> Stylesheet {
        if let Some(sheet) = Stylesheet::builtin(&settings.theme, settings.mode) {
            return sheet;
        }

        let sheet = match self.load_file(&settings.theme) {
            Ok(file) => Stylesheet {
                palette: file.variant(settings.mode).clone(),
                font: file.font.clone().unwrap_or_default(),
            },
            Err(err) => {
                tracing::warn!(theme = %settings.theme, error = %err, "theme unavailable, using default");
                return fallback(settings.mode);
            }
        };

        if sheet.is_safe() {
            sheet
        } else {
            tracing::warn!(theme = %settings.theme, "theme has unusable CSS values, using default");
            fallback(settings.mode)
        }
    }
}

fn fallback(mode: Mode) -> Stylesheet {
    Stylesheet::builtin(DEFAULT_THEME, mode).unwrap_or_default()
}

fn theme_path(dir: &Path, name: &str) -> Result<PathBuf> {
    crate::names::validate_note_name(name).map_err(|reason| NoteError::invalid_name(name, reason))?;
    Ok(dir.join(format!("{}.json", name)))
}
