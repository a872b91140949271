use super::HistoryError;
use crate::model::network::NodeId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// a node identifier as it appears in the movement history, where the same
/// node may be written as a JSON integer or as a decimal string.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawNodeId {
    Integer(i64),
    Text(String),
}

impl TryFrom<&RawNodeId> for NodeId {
    type Error = HistoryError;

    fn try_from(value: &RawNodeId) -> Result<Self, Self::Error> {
        match value {
            RawNodeId::Integer(id) => Ok(NodeId(*id)),
            RawNodeId::Text(s) => {
                NodeId::from_str(s).map_err(|_| HistoryError::InvalidNodeId(s.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RawNodeId;
    use crate::model::network::NodeId;

    #[test]
    fn test_string_and_integer_agree() {
        let ids: Vec<RawNodeId> = serde_json::from_str(r#"[5797649971, "5797649971", " 5797649971 "]"#)
            .expect("test invariant: valid json");
        for raw in ids.iter() {
            match NodeId::try_from(raw) {
                Ok(id) => assert_eq!(id, NodeId(5797649971)),
                Err(e) => panic!("{e}"),
            }
        }
    }

    #[test]
    fn test_non_numeric_string_fails() {
        let raw = RawNodeId::Text(String::from("12a"));
        assert!(NodeId::try_from(&raw).is_err());
    }
}
