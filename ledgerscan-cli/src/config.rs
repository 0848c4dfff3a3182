use anyhow::{Context, Result};
use clap::ValueEnum;
use ledgerscan_analytics::Markers;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_ledgerscan_home, ledgerscan_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub markers: MarkersSection,
    pub extract: ExtractSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkersSection {
    /// Description token flagging cash-machine activity
    pub atm: String,
    /// Description token flagging peer-to-peer payments
    pub peer_payment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    /// Command used to turn PDF statements into page text
    pub pdftotext: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl Default for MarkersSection {
    fn default() -> Self {
        let markers = Markers::default();
        Self {
            atm: markers.atm,
            peer_payment: markers.peer_payment,
        }
    }
}

impl Default for ExtractSection {
    fn default() -> Self {
        Self {
            pdftotext: "pdftotext".to_string(),
        }
    }
}

impl Config {
    pub fn markers(&self) -> Markers {
        Markers::new(&self.markers.atm, &self.markers.peer_payment)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ledgerscan_home()?.join("config.toml"))
}

/// Load `path`, or the default location when `path` is `None`.
/// A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_ledgerscan_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default())?;
    println!("Wrote {}", written.display());
    Ok(())
}
