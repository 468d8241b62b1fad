use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::eyre;
use toml_edit::{DocumentMut, Item};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::theme::ThemeMode;

const CONFIG_DIR: &str = "folio";
const CONFIG_FILE: &str = "config.toml";

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

/// Default config file location, `<config_dir>/folio/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Load the config at `path`. A missing file yields the defaults.
pub fn load_from(path: &Path) -> color_eyre::Result<AppConfig> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Persist the selected theme mode.
///
/// Only `theme.mode` is touched: comments, formatting and every other key in
/// the file are written back as they were read.
pub fn save_theme_mode(path: &Path, mode: ThemeMode) -> color_eyre::Result<()> {
    let content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };
    let mut document: DocumentMut = content.parse()?;

    let theme = document
        .entry("theme")
        .or_insert_with(toml_edit::table)
        .as_table_like_mut()
        .ok_or_else(|| eyre!("`theme` in {} is not a table", path.display()))?;
    if theme.get("mode").and_then(Item::as_str) == Some(mode.as_str()) {
        return Ok(());
    }
    theme.insert("mode", toml_edit::value(mode.as_str()));

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, document.to_string())?;
    debug!("Saved theme mode {} to {}", mode.as_str(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = [").unwrap();
        assert!(load_from(&path).is_err());
    }

    #[test]
    fn test_save_theme_mode_creates_and_updates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        save_theme_mode(&path, ThemeMode::Light).unwrap();
        assert_eq!(load_from(&path).unwrap().theme.mode, ThemeMode::Light);

        save_theme_mode(&path, ThemeMode::Dark).unwrap();
        assert_eq!(load_from(&path).unwrap().theme.mode, ThemeMode::Dark);
    }

    #[test]
    fn test_save_theme_mode_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let original = "# my settings\n[theme]\nmode = \"system\"\n\n[site]\nowner = \"Jane Doe\"\n";
        fs::write(&path, original).unwrap();

        save_theme_mode(&path, ThemeMode::Light).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# my settings\n"));
        assert!(written.contains("owner = \"Jane Doe\""));
        assert!(!written.contains("about"));
        assert!(!written.contains("keybindings"));
        assert_eq!(written.lines().count(), original.lines().count());

        let config = load_from(&path).unwrap();
        assert_eq!(config.site.owner, "Jane Doe");
        assert_eq!(config.theme.mode, ThemeMode::Light);
    }

    #[test]
    fn test_save_theme_mode_adds_missing_theme_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[blog]\nread_more = \"View\"\n").unwrap();

        save_theme_mode(&path, ThemeMode::Dark).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("read_more = \"View\""));
        assert!(written.contains("[theme]"));
        assert_eq!(load_from(&path).unwrap().theme.mode, ThemeMode::Dark);
    }

    #[test]
    fn test_save_theme_mode_rejects_non_table_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "theme = \"dark\"\n").unwrap();
        assert!(save_theme_mode(&path, ThemeMode::Light).is_err());
    }
}
