use crate::model::{network::WayFilter, BusflowCliError};
use serde::{Deserialize, Serialize};

/// defines behaviors for a transition matrix run
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct BusflowConfiguration {
    pub way_filter: WayFilter,
    pub parallelize: bool,
    pub ingest_chunk_size: usize,
    pub overwrite: bool,
    pub pretty: bool,
}

impl Default for BusflowConfiguration {
    fn default() -> Self {
        Self {
            way_filter: Default::default(),
            parallelize: true,
            ingest_chunk_size: Self::DEFAULT_INGEST_CHUNK_SIZE,
            overwrite: false,
            pretty: true,
        }
    }
}

impl BusflowConfiguration {
    const DEFAULT_INGEST_CHUNK_SIZE: usize = 256;

    /// number of movement records per ingestion shard, never zero
    pub fn get_ingest_chunk_size(&self) -> usize {
        self.ingest_chunk_size.max(1)
    }
}

impl TryFrom<&String> for BusflowConfiguration {
    type Error = BusflowCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                BusflowCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                BusflowCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                BusflowCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                BusflowCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(BusflowCliError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}
