use super::{history::HistoryError, matrix::MatrixError, network::NetworkError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BusflowCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("failure building road network: {source}")]
    NetworkError {
        #[from]
        source: NetworkError,
    },
    #[error("failure processing movement history: {source}")]
    HistoryError {
        #[from]
        source: HistoryError,
    },
    #[error("failure in transition matrix: {source}")]
    MatrixError {
        #[from]
        source: MatrixError,
    },
    #[error("failure encoding output: {source}")]
    OutputError {
        #[from]
        source: serde_json::Error,
    },
}
