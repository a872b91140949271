use super::{IngestSummary, PathFragment};
use crate::model::network::{NodeId, Segment, SegmentLookup};
use std::collections::HashSet;

/// accumulates the resolved segments of one movement path and cuts it into
/// revisit-free trips.
///
/// consecutive repeats of a segment collapse into one entry. a segment seen
/// earlier in the current trip closes that trip, and the segment becomes the
/// first entry of the next one.
#[derive(Debug, Default)]
pub struct TripSegmenter {
    buffer: Vec<Segment>,
    visited: HashSet<Segment>,
}

impl TripSegmenter {
    pub fn new() -> TripSegmenter {
        TripSegmenter::default()
    }

    /// appends a segment, returning the finished trip if this segment revisits it.
    pub fn push(&mut self, segment: Segment) -> Option<Vec<Segment>> {
        if self.buffer.last() == Some(&segment) {
            return None;
        }
        let closed = if self.visited.contains(&segment) {
            self.visited.clear();
            Some(std::mem::take(&mut self.buffer))
        } else {
            None
        };
        self.visited.insert(segment);
        self.buffer.push(segment);
        closed
    }

    /// closes the current trip, if it has any segments.
    pub fn finish(&mut self) -> Option<Vec<Segment>> {
        self.visited.clear();
        let trip = std::mem::take(&mut self.buffer);
        if trip.is_empty() {
            None
        } else {
            Some(trip)
        }
    }
}

/// resolves the fragments of one movement path and splits the result into
/// revisit-free segment sequences, in travel order. fragments that resolve to
/// no segment are skipped and counted.
pub fn segment_path(
    fragments: &[PathFragment],
    lookup: &SegmentLookup,
    summary: &mut IngestSummary,
) -> Vec<Vec<Segment>> {
    let mut segmenter = TripSegmenter::new();
    let mut trips = vec![];
    for (raw_src, raw_dst) in fragments.iter() {
        summary.fragments += 1;
        let segment = match (NodeId::try_from(raw_src), NodeId::try_from(raw_dst)) {
            (Ok(src), Ok(dst)) => match lookup.resolve(&src, &dst) {
                Ok(segment) => segment,
                Err(e) => {
                    log::debug!("skipping fragment: {e}");
                    summary.unknown_fragments += 1;
                    continue;
                }
            },
            (Err(e), _) | (_, Err(e)) => {
                log::debug!("skipping fragment: {e}");
                summary.unknown_fragments += 1;
                continue;
            }
        };
        if let Some(trip) = segmenter.push(segment) {
            summary.revisit_splits += 1;
            trips.push(trip);
        }
    }
    if let Some(trip) = segmenter.finish() {
        trips.push(trip);
    }
    trips
}

#[cfg(test)]
mod tests {
    use super::{segment_path, TripSegmenter};
    use crate::model::{
        history::{IngestSummary, RawNodeId},
        network::{NodeId, RoadNetwork, Segment, SegmentLookup, WayData, WayId},
    };
    use std::collections::HashMap;

    fn s(a: i64, b: i64) -> Segment {
        Segment::from((a, b))
    }

    #[test]
    fn test_adjacent_duplicates_collapse() {
        let mut segmenter = TripSegmenter::new();
        assert!(segmenter.push(s(1, 3)).is_none());
        assert!(segmenter.push(s(1, 3)).is_none());
        assert!(segmenter.push(s(3, 4)).is_none());
        assert_eq!(segmenter.finish(), Some(vec![s(1, 3), s(3, 4)]));
        assert_eq!(segmenter.finish(), None);
    }

    #[test]
    fn test_revisit_splits_trip() {
        let (x, ac, y, z) = (s(9, 1), s(1, 3), s(3, 7), s(3, 8));
        let mut segmenter = TripSegmenter::new();
        let mut closed = vec![];
        for segment in [x, ac, y, ac, z] {
            closed.extend(segmenter.push(segment));
        }
        closed.extend(segmenter.finish());
        assert_eq!(closed, vec![vec![x, ac, y], vec![ac, z]]);
    }

    #[test]
    fn test_segment_path_skips_unknown_fragments() {
        let w1 = WayData::new(
            WayId(1),
            vec![NodeId(1), NodeId(2), NodeId(3)],
            HashMap::new(),
        );
        let w2 = WayData::new(
            WayId(2),
            vec![NodeId(3), NodeId(4)],
            HashMap::from([(String::from("oneway"), String::from("yes"))]),
        );
        let lookup = SegmentLookup::new(&RoadNetwork::new(&[w1, w2]));
        let fragments = vec![
            (RawNodeId::Text(String::from("1")), RawNodeId::Integer(2)),
            (RawNodeId::Integer(50), RawNodeId::Integer(51)),
            (RawNodeId::Integer(2), RawNodeId::Text(String::from("3"))),
            (RawNodeId::Text(String::from("nope")), RawNodeId::Integer(3)),
            (RawNodeId::Integer(3), RawNodeId::Integer(4)),
        ];
        let mut summary = IngestSummary::default();
        let trips = segment_path(&fragments, &lookup, &mut summary);
        assert_eq!(trips, vec![vec![s(1, 3), s(3, 4)]]);
        assert_eq!(summary.fragments, 5);
        assert_eq!(summary.unknown_fragments, 2);
        assert_eq!(summary.revisit_splits, 0);
    }
}
