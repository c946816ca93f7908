use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use linedrop_core::config::CONFIG_TEMPLATE;
use linedrop_core::LinedropConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write the commented default config
    Init(InitArgs),
    /// Get a config value by dot-notation key
    Get(GetArgs),
    /// Show the effective config as TOML
    List,
    /// Validate the config file
    Validate,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Dot-notation key (e.g., "dispatch.variant")
    pub key: String,
}

pub fn run_config(args: ConfigArgs, path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(LinedropConfig::config_path);

    match args.command {
        ConfigCommands::Init(args) => run_init(args, &path),
        ConfigCommands::Get(args) => run_get(args, &path),
        ConfigCommands::List => run_list(&path),
        ConfigCommands::Validate => run_validate(&path),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Config at `path`, or defaults when the file does not exist yet
fn load_or_default(path: &PathBuf) -> Result<LinedropConfig> {
    if !path.exists() {
        return Ok(LinedropConfig::default());
    }
    LinedropConfig::load_from(path).with_context(|| format!("Failed to load config {:?}", path))
}

fn run_init(args: InitArgs, path: &PathBuf) -> Result<()> {
    if path.exists() && !args.force {
        return Err(anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            path
        ));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    println!("✅ Created config at: {:?}", path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", path);
    println!("  2. Describe your table columns under [table]");
    println!("  3. Run: linedrop config validate");

    Ok(())
}

fn run_get(args: GetArgs, path: &PathBuf) -> Result<()> {
    let config = load_or_default(path)?;
    println!("{}", get_config_value(&config, &args.key)?);
    Ok(())
}

fn run_list(path: &PathBuf) -> Result<()> {
    let config = load_or_default(path)?;
    let toml_str =
        toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
    println!("{}", toml_str);
    Ok(())
}

fn run_validate(path: &PathBuf) -> Result<()> {
    println!("🔍 Validating {:?}...", path);

    let config = LinedropConfig::load_from(path)
        .with_context(|| format!("Config at {:?} is not valid", path))?;
    let table = config.build_table()?;

    println!("   ✓ Config loaded successfully");
    println!("   Variant: {}", config.dispatch.variant);
    println!(
        "   Table: {} rows, {} slots per dispatch cycle",
        table.row_count(),
        table.slot_count()
    );
    println!("\n✅ Configuration valid!");

    Ok(())
}

// Helper to get config value by dot-notation key
fn get_config_value(config: &LinedropConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match (parts.first(), parts.get(1)) {
        (Some(&"dispatch"), Some(&"variant")) => Ok(config.dispatch.variant.to_string()),
        (Some(&"dispatch"), Some(&"commit_key")) => Ok(config.dispatch.commit_key.to_string()),
        (Some(&"table"), Some(&"rows")) => Ok(config.table.rows.to_string()),
        (Some(&"table"), Some(&"columns")) => Ok(config
            .table
            .columns
            .iter()
            .map(|c| if c.slot { format!("{}*", c.name) } else { c.name.clone() })
            .collect::<Vec<_>>()
            .join(",")),
        (Some(&"tui"), Some(&"reparse_key")) => Ok(config.tui.reparse_key.clone()),
        (Some(&"tui"), Some(&"placeholder")) => Ok(config.tui.placeholder.clone()),
        _ => Err(anyhow!("Unknown config key: {}", key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linedrop_core::ColumnSpec;

    #[test]
    fn test_get_config_value() {
        let mut config = LinedropConfig::default();
        config.table.columns = vec![ColumnSpec::plain("id"), ColumnSpec::slot("name")];

        assert_eq!(get_config_value(&config, "dispatch.variant").unwrap(), "cursor");
        assert_eq!(get_config_value(&config, "dispatch.commit_key").unwrap(), "13");
        assert_eq!(get_config_value(&config, "table.columns").unwrap(), "id,name*");
        assert!(get_config_value(&config, "table.nope").is_err());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        run_init(InitArgs { force: false }, &path).unwrap();
        assert!(path.exists());
        assert!(run_init(InitArgs { force: false }, &path).is_err());
        run_init(InitArgs { force: true }, &path).unwrap();

        let config = LinedropConfig::load_from(&path).unwrap();
        assert_eq!(config, LinedropConfig::default());
    }
}
