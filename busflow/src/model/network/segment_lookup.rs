use super::{NetworkError, NodeId, RoadNetwork, Segment};
use kdam::tqdm;
use std::collections::HashMap;

/// resolves raw node pairs ("path fragments") to the canonical [`Segment`] of
/// the road edge they lie on. built once from a finished [`RoadNetwork`] and
/// read-only afterwards.
#[derive(Default, Debug, Clone)]
pub struct SegmentLookup {
    lookup: HashMap<(NodeId, NodeId), Segment>,
    conflicts: usize,
}

impl SegmentLookup {
    /// walks every edge sub-path and records which segment each consecutive
    /// pair belongs to. edges are visited in network insertion order; when two
    /// edges claim the same raw pair, the later edge wins and the conflict is
    /// counted.
    pub fn new(network: &RoadNetwork) -> SegmentLookup {
        let mut lookup: HashMap<(NodeId, NodeId), Segment> = HashMap::new();
        let mut conflicts: usize = 0;
        let edges = network.edges();
        let iter = tqdm!(
            edges.iter(),
            total = edges.len(),
            desc = "canonicalize edge fragments"
        );
        for edge in iter {
            for fragment in edge.fragments() {
                if let Some(previous) = lookup.insert(fragment, edge.segment) {
                    if previous != edge.segment {
                        log::debug!(
                            "fragment ({}, {}) moved from segment {} to {}",
                            fragment.0,
                            fragment.1,
                            previous,
                            edge.segment
                        );
                        conflicts += 1;
                    }
                }
            }
        }
        eprintln!();
        if conflicts > 0 {
            log::warn!("{conflicts} edge fragments are shared by more than one segment");
        }
        log::info!("canonicalized {} edge fragments", lookup.len());
        SegmentLookup { lookup, conflicts }
    }

    pub fn resolve(&self, src: &NodeId, dst: &NodeId) -> Result<Segment, NetworkError> {
        self.lookup
            .get(&(*src, *dst))
            .copied()
            .ok_or(NetworkError::UnknownEdgeFragment(*src, *dst))
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// number of raw pairs that were claimed by more than one segment
    pub fn n_conflicts(&self) -> usize {
        self.conflicts
    }
}
