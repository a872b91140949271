use super::{
    AdjacencyDirection as Dir, NetworkError, NodeId, RoadEdge, Segment, WayData, WayId,
};
use kdam::tqdm;
use std::collections::{HashMap, HashSet};

pub type EdgeIndex = usize;

/// directed multigraph of road edges keyed by their endpoint nodes.
///
/// only way endpoints become graph nodes; interior way nodes live on in the
/// edge sub-paths. ways sharing endpoints produce parallel edges that stay
/// distinct, each remembering its own way id and sub-path.
#[derive(Default, Debug, Clone)]
pub struct RoadNetwork {
    /// graph nodes, i.e. the endpoints of every edge
    nodes: HashSet<NodeId>,
    /// edges in insertion order
    edges: Vec<RoadEdge>,
    /// multiedges stored wrt their src/dst node pairs
    edges_by_od: HashMap<Segment, Vec<EdgeIndex>>,
    /// ways that were rejected while building
    skipped_ways: Vec<WayId>,
}

impl RoadNetwork {
    pub fn empty() -> RoadNetwork {
        RoadNetwork {
            nodes: HashSet::new(),
            edges: vec![],
            edges_by_od: HashMap::new(),
            skipped_ways: vec![],
        }
    }

    /// creates the road multigraph for the provided ways. every way yields a
    /// forward edge, and unless tagged oneway=yes, a reverse edge over the
    /// reversed node list. ways with fewer than two nodes are skipped and
    /// reported by [`RoadNetwork::skipped_ways`].
    pub fn new(ways: &[WayData]) -> RoadNetwork {
        let mut graph = RoadNetwork::empty();
        let iter = tqdm!(ways.iter(), total = ways.len(), desc = "build road network");
        for way in iter {
            if let Err(e) = graph.add_way(way) {
                log::warn!("skipping way: {e}");
                graph.skipped_ways.push(way.id);
            }
        }
        eprintln!();
        log::info!(
            "road network has {} nodes, {} edges ({} parallel), {} ways skipped",
            graph.n_nodes(),
            graph.n_edges(),
            graph.n_parallel_edges(),
            graph.skipped_ways.len()
        );
        graph
    }

    /// inserts the edges of a single way into the graph.
    pub fn add_way(&mut self, way: &WayData) -> Result<(), NetworkError> {
        // validates the node count before any edge is inserted
        way.src_node_id()?;
        let forward = RoadEdge::new(way.id, Dir::Forward, way.nodes.clone())
            .ok_or(NetworkError::WayTooShort(way.id, way.nodes.len()))?;
        self.insert_edge(forward);

        if !way.is_oneway() {
            let reversed = way.nodes.iter().rev().copied().collect::<Vec<_>>();
            let reverse = RoadEdge::new(way.id, Dir::Reverse, reversed)
                .ok_or(NetworkError::WayTooShort(way.id, way.nodes.len()))?;
            self.insert_edge(reverse);
        }
        Ok(())
    }

    fn insert_edge(&mut self, edge: RoadEdge) {
        let index = self.edges.len();
        self.nodes.insert(edge.segment.src);
        self.nodes.insert(edge.segment.dst);
        self.edges_by_od
            .entry(edge.segment)
            .or_default()
            .push(index);
        self.edges.push(edge);
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// since this is a multigraph, there may be more than 1 edge between some pair (u, v)
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// count of edges beyond the first between any (u, v) pair
    pub fn n_parallel_edges(&self) -> usize {
        self.edges_by_od
            .values()
            .map(|multiedges| multiedges.len().saturating_sub(1))
            .sum()
    }

    pub fn skipped_ways(&self) -> &[WayId] {
        &self.skipped_ways
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.nodes.contains(node_id)
    }

    pub fn edges(&self) -> &[RoadEdge] {
        &self.edges
    }

    /// all edges running from the segment's source to its target, in insertion order.
    pub fn get_edges_from_od(&self, segment: &Segment) -> Vec<&RoadEdge> {
        match self.edges_by_od.get(segment) {
            Some(indices) => indices.iter().filter_map(|i| self.edges.get(*i)).collect(),
            None => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RoadNetwork;
    use crate::model::network::{AdjacencyDirection, NodeId, Segment, WayData, WayId};
    use std::collections::HashMap;

    fn way(id: i64, nodes: &[i64], oneway: bool) -> WayData {
        let mut tags = HashMap::from([(String::from("highway"), String::from("primary"))]);
        if oneway {
            tags.insert(String::from("oneway"), String::from("yes"));
        }
        WayData::new(WayId(id), nodes.iter().map(|n| NodeId(*n)).collect(), tags)
    }

    #[test]
    fn test_two_way_has_reversed_sub_paths() {
        let graph = RoadNetwork::new(&[way(1, &[1, 2, 3], false)]);
        assert_eq!(graph.n_edges(), 2);
        assert_eq!(graph.n_nodes(), 2, "interior node 2 is not a graph node");

        let fwd = graph.get_edges_from_od(&Segment::from((1, 3)));
        let rev = graph.get_edges_from_od(&Segment::from((3, 1)));
        match (fwd.as_slice(), rev.as_slice()) {
            ([f], [r]) => {
                assert_eq!(f.direction, AdjacencyDirection::Forward);
                assert_eq!(r.direction, AdjacencyDirection::Reverse);
                let mut expected = f.sub_nodes.clone();
                expected.reverse();
                assert_eq!(r.sub_nodes, expected);
                assert_eq!(f.way_id, r.way_id);
            }
            other => panic!("unexpected edges {other:?}"),
        }
    }

    #[test]
    fn test_oneway_has_no_reverse() {
        let graph = RoadNetwork::new(&[way(2, &[3, 4], true)]);
        assert_eq!(graph.n_edges(), 1);
        assert!(graph.get_edges_from_od(&Segment::from((4, 3))).is_empty());
    }

    #[test]
    fn test_parallel_ways_are_distinct_edges() {
        let graph = RoadNetwork::new(&[way(1, &[1, 2, 3], true), way(2, &[1, 5, 3], true)]);
        let multiedges = graph.get_edges_from_od(&Segment::from((1, 3)));
        assert_eq!(multiedges.len(), 2);
        assert_eq!(multiedges[0].way_id, WayId(1));
        assert_eq!(multiedges[1].way_id, WayId(2));
        assert_eq!(graph.n_parallel_edges(), 1);
    }

    #[test]
    fn test_short_way_is_skipped() {
        let graph = RoadNetwork::new(&[way(1, &[1], false), way(2, &[1, 2], false)]);
        assert_eq!(graph.skipped_ways(), &[WayId(1)]);
        assert_eq!(graph.n_edges(), 2);
        assert!(graph.contains_node(&NodeId(2)));
    }
}
