use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::io;
use std::time::Duration;

use crate::client::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::matcher::Delimiters;
use crate::page::LayoutSelectors;
use crate::resolver::{DEFAULT_BASE_URL, DEFAULT_HEADING_CUTOFF};
use crate::search::SearchFormat;

/// Configuration defaults that can be saved to a file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_format: Option<SearchFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_delimiter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_delimiter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_cutoff: Option<f64>,

    /// Page selector overrides; unset selectors keep their defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutSelectors>,
}

impl Config {
    /// Create a new empty config
    pub fn new() -> Self {
        Config::default()
    }

    /// Get the config file path (~/.state/pitchfork/defaults.toml)
    pub fn get_config_path() -> Result<PathBuf, io::Error> {
        let home = std::env::var("HOME")
            .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "HOME environment variable not set"))?;

        let config_dir = Path::new(&home).join(".state").join("pitchfork");
        Ok(config_dir.join("defaults.toml"))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load config from a file, returning an empty config if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !path.exists() {
            return Ok(Config::new());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;

        Ok(())
    }

    /// Merge this config with another, preferring values from other
    pub fn merge(&mut self, other: &Config) {
        if other.base_url.is_some() {
            self.base_url = other.base_url.clone();
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent.clone();
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.search_format.is_some() {
            self.search_format = other.search_format;
        }
        if other.artist_delimiter.is_some() {
            self.artist_delimiter = other.artist_delimiter.clone();
        }
        if other.album_delimiter.is_some() {
            self.album_delimiter = other.album_delimiter.clone();
        }
        if other.heading_cutoff.is_some() {
            self.heading_cutoff = other.heading_cutoff;
        }
        if other.layout.is_some() {
            self.layout = other.layout.clone();
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn search_format(&self) -> SearchFormat {
        self.search_format.unwrap_or_default()
    }

    pub fn delimiters(&self) -> Delimiters {
        let defaults = Delimiters::default();
        Delimiters {
            artist: self.artist_delimiter.clone().unwrap_or(defaults.artist),
            album: self.album_delimiter.clone().unwrap_or(defaults.album),
        }
    }

    pub fn heading_cutoff(&self) -> f64 {
        self.heading_cutoff.unwrap_or(DEFAULT_HEADING_CUTOFF)
    }

    pub fn layout(&self) -> LayoutSelectors {
        self.layout.clone().unwrap_or_default()
    }

    /// Print the config in a human-readable format
    pub fn print(&self, title: &str) {
        println!("{}:", title);

        if let Some(base_url) = &self.base_url {
            println!("  Base URL:           {}", base_url);
        }
        if let Some(user_agent) = &self.user_agent {
            println!("  User agent:         {}", user_agent);
        }
        if let Some(timeout) = self.timeout_secs {
            println!("  Timeout:            {} seconds", timeout);
        }
        if let Some(format) = self.search_format {
            println!("  Search format:      {}", format);
        }
        if let Some(delimiter) = &self.artist_delimiter {
            println!("  Artist delimiter:   {:?}", delimiter);
        }
        if let Some(delimiter) = &self.album_delimiter {
            println!("  Album delimiter:    {:?}", delimiter);
        }
        if let Some(cutoff) = self.heading_cutoff {
            println!("  Heading cutoff:     {}", cutoff);
        }
        if self.layout.is_some() {
            println!("  Page layout:        custom");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.base_url(), "https://pitchfork.com/");
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert_eq!(config.search_format(), SearchFormat::Embedded);
        assert_eq!(config.delimiters(), Delimiters::default());
        assert_eq!(config.heading_cutoff(), 0.1);
        assert_eq!(config.layout(), LayoutSelectors::default());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut saved = Config {
            base_url: Some("https://example.org/".to_string()),
            timeout_secs: Some(5),
            ..Config::new()
        };
        let cmdline = Config {
            timeout_secs: Some(30),
            search_format: Some(SearchFormat::Autocomplete),
            ..Config::new()
        };
        saved.merge(&cmdline);

        assert_eq!(saved.base_url(), "https://example.org/");
        assert_eq!(saved.timeout_secs, Some(30));
        assert_eq!(saved.search_format(), SearchFormat::Autocomplete);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("defaults.toml");

        let config = Config {
            search_format: Some(SearchFormat::Results),
            album_delimiter: Some(" + ".to_string()),
            layout: Some(LayoutSelectors { score: ".rating".to_string(), ..LayoutSelectors::default() }),
            ..Config::new()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.delimiters().album, " + ");
    }

    #[test]
    fn test_partial_layout_table() {
        let config: Config = toml::from_str("search_format = \"autocomplete\"\n\n[layout]\nscore = \".rating\"\n").unwrap();
        let layout = config.layout();
        assert_eq!(layout.score, ".rating");
        assert_eq!(layout.year, "time");
        assert_eq!(config.search_format(), SearchFormat::Autocomplete);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::new());
    }
}
