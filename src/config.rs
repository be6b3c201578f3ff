use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Optional settings file read from the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Survey extract opened at startup.
    pub dataset_path: Option<PathBuf>,
    /// Column names of the initial selection.  Validated when the app
    /// requests them, so a bad name falls back to the default chart.
    pub default_response: String,
    pub default_grouping: String,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            default_response: "satjob".to_string(),
            default_grouping: "sex".to_string(),
            window_size: [1280.0, 900.0],
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON settings document.  Missing keys keep their defaults.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("parsing dashboard settings")
    }

    /// Apply `GSS_DASHBOARD_*` overrides from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("GSS_DASHBOARD_DATASET") {
            self.dataset_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("GSS_DASHBOARD_RESPONSE") {
            self.default_response = v;
        }
        if let Some(v) = lookup("GSS_DASHBOARD_GROUPING") {
            self.default_grouping = v;
        }
    }

    /// The first positional argument (after the program name) is a dataset
    /// path.
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator<Item = String>,
    {
        if let Some(arg) = args.into_iter().next() {
            self.dataset_path = Some(PathBuf::from(arg));
        }
    }
}

fn read_config_file(path: &Path) -> anyhow::Result<DashboardConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    DashboardConfig::from_json(&raw)
}

/// Layer defaults, the settings file at `path` (if present), `lookup` and
/// the positional `args`, in that order.
pub fn load_config_from<F, I>(path: &Path, lookup: F, args: I) -> DashboardConfig
where
    F: Fn(&str) -> Option<String>,
    I: IntoIterator<Item = String>,
{
    let mut config = if path.exists() {
        match read_config_file(path) {
            Ok(cfg) => {
                log::info!("loaded settings from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("{e:#}; using defaults");
                DashboardConfig::default()
            }
        }
    } else {
        DashboardConfig::default()
    };

    config.apply_env(lookup);
    config.apply_args(args);
    config
}

/// Defaults, then `dashboard.json` if present, then environment, then the
/// first positional command-line argument as the dataset path.
pub fn load_config() -> DashboardConfig {
    load_config_from(
        Path::new(CONFIG_FILE),
        |key| std::env::var(key).ok(),
        std::env::args().skip(1),
    )
}
