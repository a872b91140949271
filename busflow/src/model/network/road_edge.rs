use super::{AdjacencyDirection, NodeId, Segment, WayId};
use itertools::Itertools;

/// one directed edge of the road multigraph. the edge keeps the raw node path
/// of its way, ordered in the direction of travel, so that every consecutive
/// pair along it can be resolved back to [`RoadEdge::segment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadEdge {
    pub way_id: WayId,
    pub segment: Segment,
    pub direction: AdjacencyDirection,
    pub sub_nodes: Vec<NodeId>,
}

impl RoadEdge {
    pub fn new(
        way_id: WayId,
        direction: AdjacencyDirection,
        sub_nodes: Vec<NodeId>,
    ) -> Option<RoadEdge> {
        let segment = match sub_nodes.as_slice() {
            [src, .., dst] => Segment::new(*src, *dst),
            _ => return None,
        };
        Some(RoadEdge {
            way_id,
            segment,
            direction,
            sub_nodes,
        })
    }

    /// consecutive raw node pairs along this edge in travel order
    pub fn fragments(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.sub_nodes.iter().copied().tuple_windows()
    }
}
