use crate::error::{NoteError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const SETTINGS_FILENAME: &str = "settings.json";
const NOTES_DIRNAME: &str = "notes";
const THEMES_DIRNAME: &str = "themes";

/// Environment variable that overrides the data root.
pub const HOME_ENV: &str = "NOTEDOWN_HOME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    #[default]
    Dark,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Light => write!(f, "light"),
            Mode::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Mode {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Mode::Light),
            "dark" => Ok(Mode::Dark),
            other => Err(NoteError::Api(format!(
                "Invalid mode: {} (expected light or dark)",
                other
            ))),
        }
    }
}

/// Settings read at startup and written on change, stored in settings.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Which style sheet the rendered document embeds
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Light or dark variant of that style sheet
    #[serde(default)]
    pub mode: Mode,
}

fn default_theme() -> String {
    crate::render::theme::DEFAULT_THEME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            mode: Mode::default(),
        }
    }
}

impl Settings {
    pub const KEYS: [&'static str; 2] = ["theme", "mode"];

    /// Load settings from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let settings_path = config_dir.as_ref().join(SETTINGS_FILENAME);

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&settings_path).map_err(NoteError::Io)?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(NoteError::Serialization)?;
        Ok(settings)
    }

    /// Save settings to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NoteError::Io)?;
        }

        let settings_path = config_dir.join(SETTINGS_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NoteError::Serialization)?;
        fs::write(settings_path, content).map_err(NoteError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "theme" => Ok(self.theme.clone()),
            "mode" => Ok(self.mode.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "theme" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(NoteError::Api("Theme name cannot be empty".to_string()));
                }
                self.theme = value.to_string();
            }
            "mode" => self.mode = value.parse()?,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> NoteError {
    NoteError::Api(format!(
        "Unknown setting: {} (known: {})",
        key,
        Settings::KEYS.join(", ")
    ))
}

/// On-disk layout under the data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub root: PathBuf,
}

impl DataPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// `$NOTEDOWN_HOME` when set, otherwise the platform data directory.
    pub fn discover() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(PathBuf::from(home)));
        }

        let dirs = ProjectDirs::from("com", "notedown", "notedown").ok_or_else(|| {
            NoteError::Api("Could not determine the data directory".to_string())
        })?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root.join(NOTES_DIRNAME)
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.root.join(THEMES_DIRNAME)
    }

    /// Settings live directly under the root.
    pub fn settings_dir(&self) -> &Path {
        &self.root
    }

    pub fn ensure(&self) -> Result<()> {
        for dir in [self.notes_dir(), self.themes_dir()] {
            if !dir.exists() {
                fs::create_dir_all(&dir).map_err(NoteError::Io)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme, "default");
        assert_eq!(settings.mode, Mode::Dark);
    }

    #[test]
    fn test_load_missing_settings() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load(dir.path()).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");

        let mut settings = Settings::default();
        settings.set("theme", "paper").unwrap();
        settings.set("mode", "Light").unwrap();
        settings.save(&nested).unwrap();

        let loaded = Settings::load(&nested).unwrap();
        assert_eq!(loaded.theme, "paper");
        assert_eq!(loaded.mode, Mode::Light);
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILENAME),
            r#"{ "mode": "light", "fontSize": 14 }"#,
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.theme, "default");
        assert_eq!(settings.mode, Mode::Light);
    }

    #[test]
    fn test_reads_plain_settings_file() {
        let settings: Settings =
            serde_json::from_str(r#"{"theme": "default", "mode": "dark"}"#).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut settings = Settings::default();
        assert!(matches!(settings.set("mode", "sepia"), Err(NoteError::Api(_))));
        assert!(matches!(settings.set("font", "x"), Err(NoteError::Api(_))));
        assert!(matches!(settings.set("theme", "  "), Err(NoteError::Api(_))));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_get() {
        let settings = Settings::default();
        assert_eq!(settings.get("mode").unwrap(), "dark");
        assert_eq!(settings.get("theme").unwrap(), "default");
        assert!(settings.get("nope").is_err());
    }

    #[test]
    fn test_data_paths_layout() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path().to_path_buf());
        paths.ensure().unwrap();
        assert!(dir.path().join("notes").is_dir());
        assert!(dir.path().join("themes").is_dir());
        assert_eq!(paths.settings_dir(), dir.path());
    }
}
