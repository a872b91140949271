use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("failure reading movement history {filepath}: {source}")]
    ReadError {
        filepath: String,
        source: std::io::Error,
    },
    #[error("movement record on line {line} is malformed: {source}")]
    MalformedRecord {
        line: usize,
        source: serde_json::Error,
    },
    #[error("'{0}' is not a valid node id")]
    InvalidNodeId(String),
    #[error("{0}")]
    InternalError(String),
}
