use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use directories::ProjectDirs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sources: SourceConfig,
    #[serde(default)]
    pub books: HashMap<String, Book>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
    #[serde(default = "default_recents_size")]
    pub recents_size: usize,
}

fn default_result_limit() -> usize { 10 }
fn default_recents_size() -> usize { 50 }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
            recents_size: default_recents_size(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SourceConfig {
    /// Path of the JSON contact export. Defaults to contacts.json in the data dir.
    pub contacts_file: Option<PathBuf>,
    /// Directory of per-card JSON files. Defaults to cards/ in the data dir.
    pub cards_dir: Option<PathBuf>,
}

/// A named set of contact sources with its own filters, analogous to keeping
/// separate address books (work, personal, leads).
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Book {
    #[serde(default)]
    pub sources: Vec<String>,
    pub blacklist: Option<Vec<String>>,
    pub whitelist: Option<Vec<String>>,
    #[serde(default)]
    pub items: Vec<StaticEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StaticEntry {
    pub company: String,
    pub contact: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let mut books = HashMap::new();
        books.insert("default".to_string(), Book {
            sources: vec!["contacts".to_string(), "cards".to_string()],
            blacklist: None,
            whitelist: None,
            items: vec![],
        });

        Self {
            general: GeneralConfig::default(),
            sources: SourceConfig::default(),
            books,
        }
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "cardpick", "cardpick")
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = if let Some(dirs) = project_dirs() {
        dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config.toml")
    };

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_a_default_book() {
        let config = Config::default();
        let book = config.books.get("default").unwrap();
        assert_eq!(book.sources, vec!["contacts", "cards"]);
        assert_eq!(config.general.result_limit, 10);
    }

    #[test]
    fn parses_a_full_config() {
        let toml_str = r#"
            [general]
            result_limit = 5
            recents_size = 20

            [sources]
            contacts_file = "/tmp/contacts.json"

            [books.work]
            sources = ["contacts"]
            blacklist = ["^test"]

            [[books.work.items]]
            company = "Acme"
            contact = "Jane Doe"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();

        assert_eq!(config.general.result_limit, 5);
        assert_eq!(config.sources.contacts_file, Some(PathBuf::from("/tmp/contacts.json")));
        let work = config.books.get("work").unwrap();
        assert_eq!(work.blacklist.as_deref(), Some(&["^test".to_string()][..]));
        assert_eq!(work.items[0].company, "Acme");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.general.recents_size, 50);
        assert!(config.sources.contacts_file.is_none());
        assert!(config.books.is_empty());
    }
}
