use anyhow::{Context, Result};
use keyring::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const SERVICE_NAME: &str = "wxc-cli";
const TOKEN_ENTRY: &str = "access_token";
const CONFIG_FILE: &str = "config.toml";

type ConfigTable = HashMap<String, toml::Value>;

#[derive(Debug, Clone)]
pub struct Config {
    config_dir: PathBuf,
    pub api_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Self::get_config_dir()?)
    }

    pub fn load_from(config_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        let config = read_table(&config_dir.join(CONFIG_FILE))?;
        let api_url = lookup(&config, "api.url");

        Ok(Self {
            config_dir,
            api_url,
        })
    }

    pub fn get_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join("wxc"))
            .context("Failed to determine config directory")
    }

    fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn get_access_token(&self) -> Result<Option<String>> {
        let entry = Entry::new(SERVICE_NAME, TOKEN_ENTRY)?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(anyhow::anyhow!("Failed to get access token: {}", e)),
        }
    }

    pub fn set_access_token(&self, token: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, TOKEN_ENTRY)?;
        entry
            .set_password(token)
            .context("Failed to store access token")?;
        Ok(())
    }

    pub fn remove_access_token(&self) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, TOKEN_ENTRY)?;
        match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(anyhow::anyhow!("Failed to remove access token: {}", e)),
        }
    }

    /// Store a value; dotted keys like `api.url` address a table entry.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let config_file = self.config_file();
        let mut config = read_table(&config_file)?;
        let value = toml::Value::String(value.to_string());

        match key.split_once('.') {
            Some((section, subkey)) => {
                config
                    .entry(section.to_string())
                    .or_insert_with(|| toml::Value::Table(toml::value::Table::new()))
                    .as_table_mut()
                    .with_context(|| format!("Config key '{}' is not a table", section))?
                    .insert(subkey.to_string(), value);
            }
            None => {
                config.insert(key.to_string(), value);
            }
        }

        let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
        fs::write(&config_file, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let config = read_table(&self.config_file())?;
        Ok(lookup(&config, key))
    }
}

fn read_table(path: &Path) -> Result<ConfigTable> {
    if !path.exists() {
        return Ok(ConfigTable::new());
    }
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn lookup(config: &ConfigTable, key: &str) -> Option<String> {
    let value = match key.split_once('.') {
        Some((section, subkey)) => config.get(section)?.as_table()?.get(subkey)?,
        None => config.get(key)?,
    };
    value.as_str().map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_nested_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().to_path_buf()).unwrap();
        assert!(config.api_url.is_none());

        config.set("api.url", "https://example.test/v1").unwrap();
        assert_eq!(
            config.get("api.url").unwrap().as_deref(),
            Some("https://example.test/v1")
        );

        let reloaded = Config::load_from(dir.path().to_path_buf()).unwrap();
        assert_eq!(reloaded.api_url.as_deref(), Some("https://example.test/v1"));
    }

    #[test]
    fn test_get_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().to_path_buf()).unwrap();

        assert_eq!(config.get("api.url").unwrap(), None);
        config.set("region", "us").unwrap();
        assert_eq!(config.get("region").unwrap().as_deref(), Some("us"));
        assert_eq!(config.get("region.name").unwrap(), None);
    }
}
