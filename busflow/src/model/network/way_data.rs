use super::{NetworkError, NodeId, WayId};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// a road way as supplied by the network source: an ordered node list plus the
/// raw tag set. only the `oneway` tag carries meaning for graph construction.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WayData {
    pub id: WayId,
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl WayData {
    pub const ONEWAY_TAG: &'static str = "oneway";
    pub const HIGHWAY_TAG: &'static str = "highway";

    pub fn new(id: WayId, nodes: Vec<NodeId>, tags: HashMap<String, String>) -> WayData {
        WayData { id, nodes, tags }
    }

    pub fn from_pbf(way: &osmpbf::elements::Way) -> WayData {
        // repeated node references would produce self-loop fragments
        let mut nodes = way.refs().map(NodeId).collect_vec();
        let n_refs = nodes.len();
        nodes.dedup();
        if nodes.len() < 2 {
            log::warn!(
                "way {} had {} nodes but after deduplication has {}",
                way.id(),
                n_refs,
                nodes.len()
            );
        }
        let tags = way
            .tags()
            .map(|(k, v)| (String::from(k), String::from(v.trim())))
            .collect::<HashMap<_, _>>();
        WayData::new(WayId(way.id()), nodes, tags)
    }

    pub fn get_tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// only the exact value "yes" marks a way as one-directional.
    pub fn is_oneway(&self) -> bool {
        matches!(self.get_tag(Self::ONEWAY_TAG), Some("yes"))
    }

    pub fn src_node_id(&self) -> Result<NodeId, NetworkError> {
        match self.nodes.as_slice() {
            [first, _, ..] => Ok(*first),
            _ => Err(NetworkError::WayTooShort(self.id, self.nodes.len())),
        }
    }
}
