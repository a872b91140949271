mod build_ops;
mod query_ops;
mod run_report;

pub use build_ops::{load_network, run_build, run_summary};
pub use query_ops::{run_between, run_pair, run_row};
pub use run_report::{MatrixSummary, NetworkSummary, RunReport};
