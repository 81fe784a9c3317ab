//! The dashboard config file: which URL serves which dataset, and which policy markers to draw.

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::policy_markers::{self, PolicyMarker};

pub const FLIPSIDE_SOURCE: &str = "FLIPSIDE";
pub const DAI_DAILY_DATASET: &str = "DAILY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path} is not valid json")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("config has no dataset {dataset} for source {source_name}")]
    MissingDataset {
        source_name: String,
        dataset: String,
    },
}

#[derive(Debug, Deserialize)]
pub struct DashboardConfig {
    #[serde(rename = "POLICY_MARKERS", default)]
    policy_markers: Option<Vec<PolicyMarker>>,
    /// Source name, e.g. FLIPSIDE, to dataset name, e.g. DAILY, to URL.
    #[serde(flatten)]
    sources: HashMap<String, HashMap<String, String>>,
}

impl DashboardConfig {
    pub fn dataset_url(&self, source: &str, dataset: &str) -> Result<&str, ConfigError> {
        self.sources
            .get(source)
            .and_then(|datasets| datasets.get(dataset))
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingDataset {
                source_name: source.to_string(),
                dataset: dataset.to_string(),
            })
    }

    pub fn dai_daily_url(&self) -> Result<&str, ConfigError> {
        self.dataset_url(FLIPSIDE_SOURCE, DAI_DAILY_DATASET)
    }

    pub fn policy_markers(&self) -> Vec<PolicyMarker> {
        self.policy_markers
            .clone()
            .unwrap_or_else(policy_markers::default_markers)
    }
}

pub fn parse_config(path: &str, text: &str) -> Result<DashboardConfig, ConfigError> {
    serde_json::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

pub fn read_config(path: impl AsRef<Path>) -> Result<DashboardConfig, ConfigError> {
    let path = path.as_ref();
    let display_path = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display_path.clone(),
        source,
    })?;
    let config = parse_config(&display_path, &text)?;
    tracing::debug!(path = display_path, "read dashboard config");
    Ok(config)
}
