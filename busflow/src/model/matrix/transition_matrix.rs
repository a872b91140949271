use crate::model::network::Segment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// the intermediate segments tied for the highest frequency between two segments
pub type ModeSet = Vec<Segment>;
/// destination segment -> mode set
pub type TransitionRow = BTreeMap<Segment, ModeSet>;

/// table of most frequent intermediate segments, keyed by ordered segment pair.
///
/// the table is sparse: a pair is only present when at least one trip passed
/// through some segment strictly between the two. `matrix[a][b]` and
/// `matrix[b][a]` are unrelated entries.
///
/// serializes as a JSON object keyed by segment strings, e.g.
/// `{"(1, 3)": {"(5, 6)": ["(3, 5)"]}}`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionMatrix {
    rows: BTreeMap<Segment, TransitionRow>,
}

impl TransitionMatrix {
    pub fn new() -> TransitionMatrix {
        TransitionMatrix::default()
    }

    pub fn insert(&mut self, from: Segment, to: Segment, modes: ModeSet) -> Option<ModeSet> {
        self.rows.entry(from).or_default().insert(to, modes)
    }

    pub fn row(&self, from: &Segment) -> Option<&TransitionRow> {
        self.rows.get(from)
    }

    pub fn get(&self, from: &Segment, to: &Segment) -> Option<&ModeSet> {
        self.rows.get(from).and_then(|row| row.get(to))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Segment, &TransitionRow)> {
        self.rows.iter()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// number of (from, to) entries across all rows
    pub fn n_entries(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<(Segment, Segment, ModeSet)> for TransitionMatrix {
    fn from_iter<T: IntoIterator<Item = (Segment, Segment, ModeSet)>>(iter: T) -> Self {
        let mut matrix = TransitionMatrix::new();
        for (from, to, modes) in iter {
            matrix.insert(from, to, modes);
        }
        matrix
    }
}
