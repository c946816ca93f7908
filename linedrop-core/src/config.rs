use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dispatch::Variant;
use crate::dispatcher::{DispatchSettings, ENTER_KEY_CODE};
use crate::error::{LinedropError, Result};
use crate::slots::{ColumnSpec, SlotTable};

/// Commented config written by `linedrop config init`
pub const CONFIG_TEMPLATE: &str = include_str!("../config.template.toml");

/// Configuration shared by the CLI and the TUI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinedropConfig {
    pub dispatch: DispatchConfig,
    pub table: TableConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub variant: Variant,
    pub commit_key: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Cursor,
            commit_key: ENTER_KEY_CODE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub rows: usize,
    pub columns: Vec<ColumnSpec>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            columns: vec![ColumnSpec::slot("value")],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub reparse_key: String,
    pub placeholder: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            reparse_key: "ctrl-r".to_string(),
            placeholder: "Paste lines here, then press Enter at the end of a line".to_string(),
        }
    }
}

impl LinedropConfig {
    /// Load config from `config_path()`, falling back to defaults when the file is absent
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LinedropError::path_not_found(path));
        }

        let content = fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|err| LinedropError::toml(path, err))?;
        config.validate()?;

        debug!("loaded config from {:?}", path);
        Ok(config)
    }

    /// Config file path: `$LINEDROP_CONFIG` or `~/.linedrop/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("LINEDROP_CONFIG") {
            return PathBuf::from(path);
        }
        Self::home_dir().join("config.toml")
    }

    /// `~/.linedrop`, or `./.linedrop` when no home directory is known
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".linedrop")
    }

    pub fn validate(&self) -> Result<()> {
        if self.table.rows == 0 {
            return Err(LinedropError::config("table.rows must be at least 1"));
        }
        if !self.table.columns.iter().any(|c| c.slot) {
            return Err(LinedropError::config(
                "table.columns needs at least one column with slot = true",
            ));
        }
        if self.tui.reparse_key.trim().is_empty() {
            return Err(LinedropError::config("tui.reparse_key must not be empty"));
        }
        Ok(())
    }

    /// Build the empty slot table described by `[table]`
    pub fn build_table(&self) -> Result<SlotTable> {
        SlotTable::new(self.table.rows, self.table.columns.clone())
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            commit_key: self.dispatch.commit_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: LinedropConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, LinedropConfig::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: LinedropConfig = toml::from_str(
            r#"
            [dispatch]
            variant = "first-line"
            "#,
        )
        .unwrap();

        assert_eq!(config.dispatch.variant, Variant::FirstLine);
        assert_eq!(config.dispatch.commit_key, ENTER_KEY_CODE);
        assert_eq!(config.table.rows, 8);
    }

    #[test]
    fn test_columns_default_to_slot() {
        let config: LinedropConfig = toml::from_str(
            r#"
            [table]
            rows = 2
            columns = [ { name = "id", slot = false }, { name = "name" } ]
            "#,
        )
        .unwrap();

        let table = config.build_table().unwrap();
        assert_eq!(table.slot_count(), 2);
        assert!(!config.table.columns[0].slot);
        assert!(config.table.columns[1].slot);
    }

    #[test]
    fn test_load_from_rejects_invalid_layout() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[table]\nrows = 0").unwrap();
        file.flush().unwrap();

        let err = LinedropConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, LinedropError::Config { .. }));
    }

    #[test]
    fn test_load_from_reports_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[dispatch\nvariant = ").unwrap();
        file.flush().unwrap();

        let err = LinedropConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, LinedropError::Toml { .. }));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = LinedropConfig::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, LinedropError::PathNotFound { .. }));
    }
}
