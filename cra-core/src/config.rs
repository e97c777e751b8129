use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use directories::BaseDirs;
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{day_token::DEFAULT_FORMATS, keywords::Keywords};

#[derive(Debug, Clone)]
pub struct Config {
    /// `chrono` formats tried, in order, when a day is typed as a date.
    pub input_date_formats: Vec<String>,
    /// Format used to display dates (missions, expenses).
    pub display_date_format: String,
    /// Format used for the title of the month grid. Default is "%B %Y".
    pub month_format: String,
    pub currency_symbol: String,
    /// The date standing for "today": relative day tokens and the month shown
    /// by the grid are resolved against it.
    pub reference_date: NaiveDate,
    /// One of trace|debug|info|warn|error.
    pub log_level: String,
    /// Absolute directory for rotating log files. Logs go to stderr when unset.
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    input_date_formats: Option<Vec<String>>,
    display_date_format: Option<String>,
    month_format: Option<String>,
    currency_symbol: Option<String>,
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
    /// Optional table:
    /// [synonyms]
    /// hier = "yesterday"
    /// lundi = "monday"
    synonyms: Option<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file_config(FileConfig::default())
    }
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native), apply defaults,
    /// and extend the global Keywords registry with user-defined synonyms if present.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Ok(Self::from_file_config(file_config))
    }

    /// Loads the config from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file_config =
            Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Self::from_file_config(file_config))
    }

    /// Input formats as string slices, the shape the day parser expects.
    pub fn input_formats(&self) -> Vec<&str> {
        self.input_date_formats.iter().map(AsRef::as_ref).collect()
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        // Extend global keyword registry once at startup.
        Self::load_synonyms(&file_config.synonyms);

        Self {
            input_date_formats: file_config.input_date_formats.unwrap_or_else(|| {
                DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect()
            }),
            display_date_format: file_config
                .display_date_format
                .unwrap_or_else(|| "%d/%m/%Y".to_string()),
            month_format: file_config
                .month_format
                .unwrap_or_else(|| "%B %Y".to_string()),
            currency_symbol: file_config
                .currency_symbol
                .unwrap_or_else(|| "€".to_string()),
            reference_date: Local::now().date_naive(),
            log_level: file_config
                .log_level
                .unwrap_or_else(|| "warn".to_string()),
            log_dir: file_config.log_dir,
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("cra").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("cra").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global Keywords registry.
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        match synonyms {
            Some(map) if !map.is_empty() => {
                let pairs: Vec<(String, String)> =
                    map.iter().map(|(a, t)| (a.clone(), t.clone())).collect();
                Keywords::extend(&pairs);
            }
            _ => {}
        }
    }
}
