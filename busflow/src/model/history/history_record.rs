use super::RawNodeId;
use serde::{Deserialize, Serialize};

/// one ordered raw node pair traversed by a vehicle
pub type PathFragment = (RawNodeId, RawNodeId);

/// a line of the movement history: a vehicle's list of sub-trips. fields other
/// than the fragment lists are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct HistoryRecord {
    #[serde(rename = "tripList")]
    pub trip_list: Vec<MovementPath>,
}

/// one sub-trip of a [`HistoryRecord`]
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct MovementPath {
    #[serde(rename = "edgesOfPath2", default)]
    pub fragments: Option<Vec<PathFragment>>,
}

impl MovementPath {
    /// the fragments of this path, or None when the path carries no movement
    pub fn fragments(&self) -> Option<&[PathFragment]> {
        match &self.fragments {
            Some(fragments) if !fragments.is_empty() => Some(fragments),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HistoryRecord;

    #[test]
    fn test_deserialize_mixed_node_ids() {
        let line = r#"{"vehicle": "51B-123", "tripList": [
            {"edgesOfPath2": [["1", "2"], [2, 3]], "routeId": 7},
            {"edgesOfPath2": []},
            {}
        ]}"#;
        let record: HistoryRecord = serde_json::from_str(line).expect("test invariant: valid record");
        assert_eq!(record.trip_list.len(), 3);
        assert_eq!(record.trip_list[0].fragments().map(|f| f.len()), Some(2));
        assert!(record.trip_list[1].fragments().is_none());
        assert!(record.trip_list[2].fragments().is_none());
    }

    #[test]
    fn test_missing_trip_list_is_malformed() {
        let result = serde_json::from_str::<HistoryRecord>(r#"{"edgesOfPath2": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_fragment_must_be_a_pair() {
        let result =
            serde_json::from_str::<HistoryRecord>(r#"{"tripList": [{"edgesOfPath2": [[1, 2, 3]]}]}"#);
        assert!(result.is_err());
    }
}
