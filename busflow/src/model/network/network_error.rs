use thiserror::Error;

use super::{NodeId, WayId};

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("failure reading .pbf file: {source}")]
    PbfLibError { source: osmpbf::Error },
    #[error("failure reading way records from {filepath}: {source}")]
    WayReadError {
        filepath: String,
        source: std::io::Error,
    },
    #[error("way record on line {line} of {filepath} is invalid: {source}")]
    InvalidWayRecord {
        filepath: String,
        line: usize,
        source: serde_json::Error,
    },
    #[error("way '{0}' has {1} nodes, at least 2 are required")]
    WayTooShort(WayId, usize),
    #[error("no segment contains the path fragment ({0}, {1})")]
    UnknownEdgeFragment(NodeId, NodeId),
    #[error("'{0}' is not a valid segment key, expected '(source, target)'")]
    InvalidSegmentKey(String),
    #[error("source does not contain any ways accepted by the way filter")]
    NoWaysFound,
    #[error("{0}")]
    InternalError(String),
}
