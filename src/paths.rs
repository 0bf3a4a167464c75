use anyhow::{Context, Result};
use std::path::PathBuf;

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables.
    ///
    /// Priority: CLI args -> ENV var (SEQLINE_CONFIG_DIR) -> None (defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir =
            cli_dir.or_else(|| std::env::var("SEQLINE_CONFIG_DIR").ok().map(PathBuf::from));
        Self { config_dir }
    }
}

/// Get path to a configuration file (theme, settings).
///
/// Priority: custom dir (CLI/ENV) -> local folder if seqline config files
/// already live there -> platform config dir via dirs-next
/// (~/.config/seqline on Linux).
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::config_dir).join(name)
}

/// Get path to a data file (logs, caches). Same priority chain but ends in
/// the platform data dir (~/.local/share/seqline on Linux).
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::data_dir).join(name)
}

/// Create the configuration and data directories if missing
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    for dir in [
        resolve_dir(config, dirs_next::config_dir),
        resolve_dir(config, dirs_next::data_dir),
    ] {
        if !dir.exists() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Check if any seqline config files exist in the given directory
fn has_local_config_files(dir: &std::path::Path) -> bool {
    ["seqline.json", "seqline_theme.json", "seqline.log"]
        .iter()
        .any(|f| dir.join(f).exists())
}

fn resolve_dir(config: &PathConfig, platform: fn() -> Option<PathBuf>) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }
    if let Ok(cwd) = std::env::current_dir() {
        if has_local_config_files(&cwd) {
            return cwd;
        }
    }
    if let Some(dir) = platform() {
        return dir.join("seqline");
    }
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_with_custom_dir() {
        let config = PathConfig { config_dir: Some(PathBuf::from("/custom")) };
        assert_eq!(config_file("theme.json", &config), PathBuf::from("/custom/theme.json"));
    }

    #[test]
    fn test_data_file_with_custom_dir() {
        let config = PathConfig { config_dir: Some(PathBuf::from("/custom")) };
        assert_eq!(data_file("seqline.log", &config), PathBuf::from("/custom/seqline.log"));
    }

    #[test]
    fn test_cli_dir_beats_env() {
        let config = PathConfig::from_env_and_cli(Some(PathBuf::from("/cli")));
        assert_eq!(config.config_dir, Some(PathBuf::from("/cli")));
    }

    #[test]
    fn test_platform_default_contains_app_name() {
        let config = PathConfig { config_dir: None };
        let path = config_file("seqline.json", &config);
        assert!(path.to_string_lossy().contains("seqline.json"));
    }
}
