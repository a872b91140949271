mod frequency_counter;
mod matrix_builder;
mod point_query;

pub use frequency_counter::FrequencyCounter;
pub use matrix_builder::{build_transition_matrix, pair_transitions, PairTransitions};
pub use point_query::{most_frequent_between, PointQueryResult};
