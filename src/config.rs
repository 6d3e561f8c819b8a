use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub auto_refresh: bool,
    pub default_view: String,
    pub default_sort: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 2000,
            auto_refresh: true,
            default_view: "processes".to_string(),
            default_sort: "pid".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
    pub sev_low: String,
    pub sev_normal: String,
    pub sev_elevated: String,
    pub sev_critical: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
            sev_low: String::new(),
            sev_normal: String::new(),
            sev_elevated: String::new(),
            sev_critical: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub confirm: String,
    pub dismiss: String,
    pub refresh: String,
    pub cycle_sort: String,
    pub cycle_theme: String,
    pub filter: String,
    pub help: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            confirm: "Enter".to_string(),
            dismiss: "Tab".to_string(),
            refresh: "r".to_string(),
            cycle_sort: "s".to_string(),
            cycle_theme: "t".to_string(),
            filter: "/".to_string(),
            help: "?".to_string(),
        }
    }
}

/// Parse a config key name into a crossterm key code.
/// Single characters map to themselves; named keys are case-insensitive.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "escape" | "esc" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        _ => None,
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("proctop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.refresh_rate_ms, 2000);
        assert!(config.general.auto_refresh);
        assert_eq!(config.general.default_view, "processes");
        assert_eq!(config.general.default_sort, "pid");
        assert_eq!(config.colors.theme, "dark");
        assert_eq!(config.keybinds.quit, "q");
        assert_eq!(config.keybinds.dismiss, "Tab");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 500);
        // Other fields should be defaults
        assert_eq!(config.general.default_view, "processes");
        assert_eq!(config.keybinds.confirm, "Enter");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r##"
[general]
refresh_rate_ms = 1000
auto_refresh = false
default_view = "system"
default_sort = "cpu"

[colors]
theme = "light"
sev_critical = "#ff0000"

[keybinds]
quit = "x"
dismiss = "Escape"
"##;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 1000);
        assert!(!config.general.auto_refresh);
        assert_eq!(config.general.default_view, "system");
        assert_eq!(config.general.default_sort, "cpu");
        assert_eq!(config.colors.theme, "light");
        assert_eq!(config.colors.sev_critical, "#ff0000");
        assert_eq!(config.keybinds.quit, "x");
        assert_eq!(config.keybinds.dismiss, "Escape");
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.refresh_rate_ms, 2000);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("proctop_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.refresh_rate_ms, 2000);
        let _ = std::fs::remove_file(&temp);
    }

    #[test]
    fn key_names_parse() {
        assert_eq!(parse_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("/"), Some(KeyCode::Char('/')));
        assert_eq!(parse_key("Enter"), Some(KeyCode::Enter));
        assert_eq!(parse_key("tab"), Some(KeyCode::Tab));
        assert_eq!(parse_key("Esc"), Some(KeyCode::Esc));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("bogus"), None);
    }
}
