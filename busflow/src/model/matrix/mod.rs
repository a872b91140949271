mod matrix_error;
mod matrix_store;
mod transition_matrix;

pub use matrix_error::MatrixError;
pub use matrix_store::MatrixStore;
pub use transition_matrix::{ModeSet, TransitionMatrix, TransitionRow};
