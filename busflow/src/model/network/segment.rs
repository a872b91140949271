use super::{NetworkError, NodeId};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt::Display, str::FromStr};

/// canonical directed edge of the road network, identified by the head and tail
/// nodes of one traversal direction of a way. every raw node pair along that
/// traversal resolves to this segment.
///
/// segments are persisted by their string form `(source, target)`, which is
/// why they serialize as strings (and can therefore be used as JSON map keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Segment {
    pub src: NodeId,
    pub dst: NodeId,
}

impl Segment {
    pub fn new(src: NodeId, dst: NodeId) -> Segment {
        Segment { src, dst }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.src, self.dst)
    }
}

impl FromStr for Segment {
    type Err = NetworkError;

    /// accepts `(src, dst)` with or without whitespace around either id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NetworkError::InvalidSegmentKey(s.to_string());
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let (src_str, dst_str) = inner.split_once(',').ok_or_else(invalid)?;
        let src = NodeId::from_str(src_str).map_err(|_| invalid())?;
        let dst = NodeId::from_str(dst_str).map_err(|_| invalid())?;
        Ok(Segment::new(src, dst))
    }
}

impl From<(i64, i64)> for Segment {
    fn from(value: (i64, i64)) -> Self {
        Segment::new(NodeId(value.0), NodeId(value.1))
    }
}

impl Serialize for Segment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Segment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Segment::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::Segment;
    use crate::model::network::NodeId;
    use std::str::FromStr;

    #[test]
    fn test_parse_display_form() {
        let segment = Segment::new(NodeId(5797649971), NodeId(377085386));
        let key = segment.to_string();
        assert_eq!(key, "(5797649971, 377085386)");
        match Segment::from_str(&key) {
            Ok(parsed) => assert_eq!(parsed, segment),
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn test_parse_without_whitespace() {
        match Segment::from_str("(1,-2)") {
            Ok(parsed) => assert_eq!(parsed, Segment::from((1, -2))),
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "(1, 2", "1, 2", "(1 2)", "(a, 2)", "(1, 2, 3)"] {
            assert!(
                Segment::from_str(bad).is_err(),
                "'{bad}' should not parse as a segment"
            );
        }
    }

    #[test]
    fn test_serde_as_map_key() {
        let mut row = std::collections::BTreeMap::new();
        row.insert(Segment::from((1, 3)), vec![Segment::from((3, 4))]);
        let json = serde_json::to_string(&row).expect("test invariant: serializable");
        assert_eq!(json, r#"{"(1, 3)":["(3, 4)"]}"#);
        let back: std::collections::BTreeMap<Segment, Vec<Segment>> =
            serde_json::from_str(&json).expect("test invariant: deserializable");
        assert_eq!(back, row);
    }
}
