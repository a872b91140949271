use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("no data for {0}")]
    MatrixKeyNotFound(String),
    #[error("failure accessing matrix file {filepath}: {source}")]
    StorageIoFailure {
        filepath: String,
        source: std::io::Error,
    },
    #[error("failure encoding or decoding matrix file {filepath}: {source}")]
    SerializationFailure {
        filepath: String,
        source: serde_json::Error,
    },
    #[error("matrix file {0} already exists and overwrite is not enabled")]
    FileExists(String),
    #[error("{0}")]
    InternalError(String),
}

impl MatrixError {
    /// true when the error only reports that the table holds no entry for a query
    pub fn is_no_data(&self) -> bool {
        matches!(self, MatrixError::MatrixKeyNotFound(_))
    }
}
