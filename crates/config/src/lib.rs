use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub mod error;

use error::*;

/// Maps internal game mode keys to display labels. Keys are stored lowercase
/// and looked up case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct ModeNames(BTreeMap<String, String>);

impl ModeNames {
  pub fn empty() -> Self {
    ModeNames(BTreeMap::new())
  }

  pub fn insert(&mut self, key: &str, label: impl Into<String>) {
    self.0.insert(key.to_lowercase(), label.into());
  }

  pub fn extend(&mut self, other: ModeNames) {
    self.0.extend(other.0);
  }

  /// Display label for `key`, or `key` itself when it is not in the table.
  pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
    self
      .0
      .get(&key.to_lowercase())
      .map(String::as_str)
      .unwrap_or(key)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl Default for ModeNames {
  fn default() -> Self {
    let mut names = ModeNames::empty();
    for (key, label) in mcfruit_constants::MODE_NAMES {
      names.insert(key, *label);
    }
    names
  }
}

impl From<BTreeMap<String, String>> for ModeNames {
  fn from(map: BTreeMap<String, String>) -> Self {
    let mut names = ModeNames::empty();
    for (key, label) in map {
      names.insert(&key, label);
    }
    names
  }
}

impl From<ModeNames> for BTreeMap<String, String> {
  fn from(names: ModeNames) -> Self {
    names.0
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
  pub api_base_url: String,
  pub avatar_base_url: String,
  pub server_name: String,
  pub server_address: String,
  pub status_api_url: String,
  pub status_refresh_secs: u64,
  pub request_timeout_secs: Option<u64>,
  pub mode_names: ModeNames,
}

impl Default for SiteConfig {
  fn default() -> Self {
    SiteConfig {
      api_base_url: mcfruit_constants::API_BASE_URL.to_string(),
      avatar_base_url: mcfruit_constants::AVATAR_BASE_URL.to_string(),
      server_name: mcfruit_constants::SERVER_NAME.to_string(),
      server_address: mcfruit_constants::SERVER_ADDRESS.to_string(),
      status_api_url: mcfruit_constants::STATUS_API_URL.to_string(),
      status_refresh_secs: mcfruit_constants::STATUS_REFRESH_SECS,
      request_timeout_secs: None,
      mode_names: ModeNames::default(),
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlConfig {
  pub api_base_url: Option<String>,
  pub avatar_base_url: Option<String>,
  pub server_name: Option<String>,
  pub server_address: Option<String>,
  pub status_api_url: Option<String>,
  pub status_refresh_secs: Option<u64>,
  pub request_timeout_secs: Option<u64>,
  pub mode_names: Option<ModeNames>,
}

impl SiteConfig {
  pub fn from_env() -> Result<Self> {
    let mut config = SiteConfig::default();

    config.apply_env();
    config.validate()?;

    Ok(config)
  }

  /// Loads `mcfruit.toml` from the working directory, falling back to
  /// defaults when the file does not exist.
  pub fn load() -> Result<Self> {
    let path = Path::new(mcfruit_constants::CONFIG_FILE);
    if !path.exists() {
      tracing::debug!("{} not found, using defaults", path.display());
      return Self::from_env();
    }
    Self::load_from(path)
  }

  pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
    let mut config = Self::from_toml_str(&fs::read_to_string(path)?)?;

    config.apply_env();
    config.validate()?;

    Ok(config)
  }

  pub fn from_toml_str(content: &str) -> Result<Self> {
    let config: TomlConfig = toml::from_str(content)?;
    let defaults = SiteConfig::default();

    let mut mode_names = defaults.mode_names;
    if let Some(overrides) = config.mode_names {
      mode_names.extend(overrides);
    }

    let config = SiteConfig {
      api_base_url: config.api_base_url.unwrap_or(defaults.api_base_url),
      avatar_base_url: config.avatar_base_url.unwrap_or(defaults.avatar_base_url),
      server_name: config.server_name.unwrap_or(defaults.server_name),
      server_address: config.server_address.unwrap_or(defaults.server_address),
      status_api_url: config.status_api_url.unwrap_or(defaults.status_api_url),
      status_refresh_secs: config
        .status_refresh_secs
        .unwrap_or(defaults.status_refresh_secs),
      request_timeout_secs: config.request_timeout_secs,
      mode_names,
    };
    config.validate()?;
    Ok(config)
  }

  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, toml::to_string_pretty(self)?).map_err(Into::into)
  }

  pub fn status_refresh(&self) -> Duration {
    Duration::from_secs(self.status_refresh_secs)
  }

  pub fn request_timeout(&self) -> Option<Duration> {
    self.request_timeout_secs.map(Duration::from_secs)
  }

  fn validate(&self) -> Result<()> {
    if self.status_refresh_secs == 0 {
      return Err(Error::InvalidValue {
        key: "status_refresh_secs",
        value: self.status_refresh_secs.to_string(),
      });
    }
    if self.api_base_url.trim().is_empty() {
      return Err(Error::InvalidValue {
        key: "api_base_url",
        value: self.api_base_url.clone(),
      });
    }
    Ok(())
  }

  fn apply_env(&mut self) {
    self.apply_overrides(|key| std::env::var(key).ok())
  }

  fn apply_overrides<F>(&mut self, lookup: F)
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(url) = lookup("MCFRUIT_API_BASE_URL") {
      self.api_base_url = url;
    }

    if let Some(url) = lookup("MCFRUIT_AVATAR_BASE_URL") {
      self.avatar_base_url = url;
    }

    if let Some(name) = lookup("MCFRUIT_SERVER_NAME") {
      self.server_name = name;
    }

    if let Some(address) = lookup("MCFRUIT_SERVER_ADDRESS") {
      self.server_address = address;
    }

    if let Some(url) = lookup("MCFRUIT_STATUS_API_URL") {
      self.status_api_url = url;
    }

    if let Some(value) = lookup("MCFRUIT_STATUS_REFRESH_SECS") {
      match value.parse() {
        Ok(secs) => self.status_refresh_secs = secs,
        Err(_) => tracing::warn!("ignoring invalid MCFRUIT_STATUS_REFRESH_SECS: {}", value),
      }
    }

    if let Some(value) = lookup("MCFRUIT_REQUEST_TIMEOUT_SECS") {
      match value.parse() {
        Ok(secs) => self.request_timeout_secs = Some(secs),
        Err(_) => tracing::warn!("ignoring invalid MCFRUIT_REQUEST_TIMEOUT_SECS: {}", value),
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  #[test]
  fn test_defaults() {
    let config = SiteConfig::default();
    assert_eq!(config.api_base_url, "http://localhost:8080/api");
    assert_eq!(config.server_name, "MCFruit");
    assert_eq!(config.status_refresh(), Duration::from_secs(30));
    assert_eq!(config.request_timeout(), None);
    assert_eq!(config.mode_names.len(), 6);
  }

  #[test]
  fn test_mode_names_lookup() {
    let names = ModeNames::default();
    assert_eq!(names.display_name("NODEBUFF"), "NoDebuff");
    assert_eq!(names.display_name("BuildUhc"), "BuildUHC");
    assert_eq!(names.display_name("unknownmode"), "unknownmode");
  }

  #[test]
  fn test_toml_overrides() {
    let config = SiteConfig::from_toml_str(
      r#"
api_base_url = "https://stats.mcfruit.club/api"
server_name = "Fruit"
request_timeout_secs = 5

[mode_names]
Combo = "Combo Duels"
SUMO = "Sumo Duels"
"#,
    )
    .unwrap();
    assert_eq!(config.api_base_url, "https://stats.mcfruit.club/api");
    assert_eq!(config.server_name, "Fruit");
    assert_eq!(config.server_address, "mcfruit.club");
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    assert_eq!(config.mode_names.display_name("combo"), "Combo Duels");
    assert_eq!(config.mode_names.display_name("sumo"), "Sumo Duels");
    assert_eq!(config.mode_names.display_name("gapple"), "Gapple");
  }

  #[test]
  fn test_zero_refresh_rejected() {
    let err = SiteConfig::from_toml_str("status_refresh_secs = 0").unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidValue {
        key: "status_refresh_secs",
        ..
      }
    ));
  }

  #[test]
  fn test_env_overrides() {
    let vars: HashMap<&str, &str> = vec![
      ("MCFRUIT_API_BASE_URL", "http://127.0.0.1:9000/api"),
      ("MCFRUIT_SERVER_NAME", "Staging"),
      ("MCFRUIT_STATUS_REFRESH_SECS", "not-a-number"),
      ("MCFRUIT_REQUEST_TIMEOUT_SECS", "10"),
    ]
    .into_iter()
    .collect();

    let mut config = SiteConfig::default();
    config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
    assert_eq!(config.api_base_url, "http://127.0.0.1:9000/api");
    assert_eq!(config.server_name, "Staging");
    assert_eq!(config.status_refresh_secs, 30);
    assert_eq!(config.request_timeout_secs, Some(10));
  }

  #[test]
  fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mcfruit.toml");
    let mut config = SiteConfig::default();
    config.server_address = "play.mcfruit.club".to_string();
    config.mode_names.insert("Combo", "Combo");
    config.save(&path).unwrap();

    let loaded = SiteConfig::from_toml_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, config);
  }
}
