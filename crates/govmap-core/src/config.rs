use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GovMapError, Result};
use crate::government::TotalsMode;

const CONFIG_FILE: &str = "config.toml";
const BASE_DIR_NAME: &str = ".govmap";

pub const DEFAULT_GOVERNMENTS_FILE: &str = "governmentMapping.txt";
pub const DEFAULT_REFORMS_FILE: &str = "issues.txt";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# govmap configuration file
# Location: ~/.govmap/config.toml

[sources]
# Government mapping rules (link = { vic = ... hoi = ... } entries)
# Relative paths are resolved against this directory
governments = "governmentMapping.txt"

# Reform definitions (political_reforms / social_reforms sections)
reforms = "issues.txt"

[mapping]
# How the reform total used as progress divisor is computed
#   last_track: ranked levels of the last parsed track - 1
#   summed:     sum of (ranked levels - 1) over all tracks
totals = "last_track"
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub mapping: MappingConfig,
}

/// Input document locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_governments")]
    pub governments: PathBuf,

    #[serde(default = "default_reforms")]
    pub reforms: PathBuf,
}

fn default_governments() -> PathBuf {
    PathBuf::from(DEFAULT_GOVERNMENTS_FILE)
}

fn default_reforms() -> PathBuf {
    PathBuf::from(DEFAULT_REFORMS_FILE)
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            governments: default_governments(),
            reforms: default_reforms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MappingConfig {
    #[serde(default)]
    pub totals: TotalsMode,
}

/// Base directory when neither `--base-dir` nor `GOVMAP_BASE` is given
pub fn default_base_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(BASE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(BASE_DIR_NAME))
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| GovMapError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    pub fn governments_path(&self, base_dir: &Path) -> PathBuf {
        resolve(base_dir, &self.sources.governments)
    }

    pub fn reforms_path(&self, base_dir: &Path) -> PathBuf {
        resolve(base_dir, &self.sources.reforms)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "sources.governments" => Some(self.sources.governments.display().to_string()),
            "sources.reforms" => Some(self.sources.reforms.display().to_string()),
            "mapping.totals" => Some(self.mapping.totals.to_string()),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "sources.governments" => {
                self.sources.governments = parse_path(key, value)?;
                Ok(())
            }
            "sources.reforms" => {
                self.sources.reforms = parse_path(key, value)?;
                Ok(())
            }
            "mapping.totals" => {
                self.mapping.totals = value.parse().map_err(|_| GovMapError::InvalidConfigValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
                Ok(())
            }
            _ => Err(GovMapError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        ["sources.governments", "sources.reforms", "mapping.totals"]
            .iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn parse_path(key: &str, value: &str) -> Result<PathBuf> {
    let trimmed = value.trim().trim_matches('"').trim_matches('\'');
    if trimmed.is_empty() {
        return Err(GovMapError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.sources.governments, PathBuf::from(DEFAULT_GOVERNMENTS_FILE));
        assert_eq!(config.mapping.totals, TotalsMode::LastTrack);
    }

    #[test]
    fn test_init_template_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::init(dir.path()).unwrap();
        assert!(path.exists());

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.sources.reforms, PathBuf::from(DEFAULT_REFORMS_FILE));
        assert_eq!(config.mapping.totals, TotalsMode::LastTrack);
    }

    #[test]
    fn test_init_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            Config::path(dir.path()),
            "[mapping]\ntotals = \"summed\"\n",
        )
        .unwrap();

        Config::init(dir.path()).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.mapping.totals, TotalsMode::Summed);
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(Config::path(dir.path()), "[mapping]\ntotals = \"median\"\n").unwrap();

        let result = Config::load(dir.path());
        assert!(matches!(result, Err(GovMapError::ConfigParse { .. })));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.set("sources.reforms", "common/issues.txt").unwrap();
        config.set("mapping.totals", "summed").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.sources.reforms, PathBuf::from("common/issues.txt"));
        assert_eq!(loaded.mapping.totals, TotalsMode::Summed);
    }

    #[test]
    fn test_config_get_set() {
        let mut config = Config::default();

        config.set("sources.governments", "\"mappings/gov.txt\"").unwrap();
        assert_eq!(
            config.get("sources.governments").as_deref(),
            Some("mappings/gov.txt")
        );
        assert!(config.get("sources.unknown").is_none());

        assert!(matches!(
            config.set("mapping.totals", "average"),
            Err(GovMapError::InvalidConfigValue { .. })
        ));
        assert!(matches!(
            config.set("mapping.unknown", "x"),
            Err(GovMapError::ConfigKeyNotFound { .. })
        ));
        assert!(matches!(
            config.set("sources.reforms", "  "),
            Err(GovMapError::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_list_covers_all_keys() {
        let keys: Vec<_> = Config::default().list().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["sources.governments", "sources.reforms", "mapping.totals"]
        );
    }

    #[test]
    fn test_source_paths_resolve_against_base() {
        let base = Path::new("/srv/govmap");
        let mut config = Config::default();
        assert_eq!(
            config.governments_path(base),
            PathBuf::from("/srv/govmap/governmentMapping.txt")
        );

        config.sources.reforms = PathBuf::from("/games/vic2/common/issues.txt");
        assert_eq!(
            config.reforms_path(base),
            PathBuf::from("/games/vic2/common/issues.txt")
        );
    }
}
