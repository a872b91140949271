use crate::model::{
    history::IngestSummary,
    matrix::TransitionMatrix,
    network::{RoadNetwork, SegmentLookup},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub nodes: usize,
    pub edges: usize,
    pub parallel_edges: usize,
    pub skipped_ways: usize,
    pub edge_fragments: usize,
    pub fragment_conflicts: usize,
}

impl NetworkSummary {
    pub fn new(network: &RoadNetwork, lookup: &SegmentLookup) -> NetworkSummary {
        NetworkSummary {
            nodes: network.n_nodes(),
            edges: network.n_edges(),
            parallel_edges: network.n_parallel_edges(),
            skipped_ways: network.skipped_ways().len(),
            edge_fragments: lookup.len(),
            fragment_conflicts: lookup.n_conflicts(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixSummary {
    pub rows: usize,
    pub entries: usize,
}

impl From<&TransitionMatrix> for MatrixSummary {
    fn from(matrix: &TransitionMatrix) -> Self {
        MatrixSummary {
            rows: matrix.n_rows(),
            entries: matrix.n_entries(),
        }
    }
}

/// statistics of a `build` or `summary` run, printed as JSON by the cli
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub network: NetworkSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingest: Option<IngestSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus_used_segments: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<MatrixSummary>,
}
