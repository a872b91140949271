mod busflow_cli_error;
pub mod history;
pub mod io_ops;
pub mod matrix;
pub mod network;

pub use busflow_cli_error::BusflowCliError;
