use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Saved defaults for the pause detection tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_pause_duration: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_chart: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

impl Config {
    /// Create a new empty config
    pub fn new() -> Self {
        Config {
            threshold: None,
            min_pause_duration: None,
            no_chart: None,
            verbose: None,
        }
    }

    /// Get the config file path (~/.state/pausescan/defaults.toml)
    pub fn get_config_path() -> Result<PathBuf, io::Error> {
        let home = std::env::var("HOME")
            .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "HOME environment variable not set"))?;

        let config_dir = Path::new(&home).join(".state").join("pausescan");
        Ok(config_dir.join("defaults.toml"))
    }

    /// Load config from file
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Return empty config if file doesn't exist
            return Ok(Config::new());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    /// Merge this config with another, preferring values from other
    pub fn merge(&mut self, other: &Config) {
        if other.threshold.is_some() {
            self.threshold = other.threshold;
        }
        if other.min_pause_duration.is_some() {
            self.min_pause_duration = other.min_pause_duration;
        }
        if other.no_chart.is_some() {
            self.no_chart = other.no_chart;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
    }

    /// Print the config in a human-readable format
    pub fn print(&self, title: &str) {
        println!("{}:", title);

        if let Some(threshold) = self.threshold {
            println!("  Energy threshold:   {}", threshold);
        }
        if let Some(min_pause) = self.min_pause_duration {
            println!("  Min pause duration: {} seconds", min_pause);
        }
        if let Some(no_chart) = self.no_chart {
            println!("  Chart:              {}", if no_chart { "disabled" } else { "enabled" });
        }
        if let Some(verbose) = self.verbose {
            println!("  Verbose:            {}", if verbose { "on" } else { "off" });
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
