use serde::{Deserialize, Serialize};
use std::{fmt::Display, ops::AddAssign};

/// tallies of an ingestion pass. every skipped input is counted here.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    pub records: usize,
    pub malformed_records: usize,
    pub paths: usize,
    pub empty_paths: usize,
    pub fragments: usize,
    pub unknown_fragments: usize,
    pub revisit_splits: usize,
    pub trips: usize,
}

impl AddAssign for IngestSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.records += rhs.records;
        self.malformed_records += rhs.malformed_records;
        self.paths += rhs.paths;
        self.empty_paths += rhs.empty_paths;
        self.fragments += rhs.fragments;
        self.unknown_fragments += rhs.unknown_fragments;
        self.revisit_splits += rhs.revisit_splits;
        self.trips += rhs.trips;
    }
}

impl Display for IngestSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records ({} malformed), {} paths ({} empty), {} fragments ({} unknown), {} trips ({} from revisit splits)",
            self.records,
            self.malformed_records,
            self.paths,
            self.empty_paths,
            self.fragments,
            self.unknown_fragments,
            self.trips,
            self.revisit_splits
        )
    }
}
