// Configuration file loading and creation

use super::types::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("penguinfut");
    path.push("config.toml");
    path
}

/// Load configuration from `path` (or the default location), creating a
/// default file when none exists yet
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path(),
    };

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        Ok(parse_config(&contents))
    } else {
        create_default_config(&config_path)?;
        Ok(Config::default())
    }
}

/// Parse a config file body, falling back to defaults on malformed input
/// and on physics values the simulation cannot run with
pub fn parse_config(contents: &str) -> Config {
    let mut config: Config = match toml::from_str(contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to parse config file, using defaults: {}", e);
            return Config::default();
        }
    };
    config.physics.sanitize();
    config
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let config = Config::default();
    let toml_string = toml::to_string_pretty(&config).context("serializing default config")?;

    let commented_toml = format!(
        "# Penguinfut Configuration File\n\
         # Edit this file to customize game behavior\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # Key binding format: \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Space\", \"Esc\"\n\
         #                     or single characters like \"W\", \"S\", \"Q\", etc.\n\
         #\n\
         # friction_model: \"per_frame\" (classic feel) or \"time_scaled\"\n\
         # Colors: RGB values from 0-255\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("Created default config file at {}", path.display());
    Ok(())
}
