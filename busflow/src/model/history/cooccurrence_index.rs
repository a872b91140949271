use super::{Trip, TripId};
use crate::model::network::Segment;
use std::collections::{BTreeSet, HashMap};

/// inverted index from segment to the trips that contain it, with the position
/// of the segment within each of those trips.
///
/// a segment used by no trip has no entry at all: lookups distinguish "never
/// seen" (None) from any recorded value.
#[derive(Default, Debug, Clone)]
pub struct CooccurrenceIndex {
    trips_by_segment: HashMap<Segment, BTreeSet<TripId>>,
    positions: HashMap<TripId, HashMap<Segment, usize>>,
}

impl CooccurrenceIndex {
    pub fn new(trips: &[Trip]) -> CooccurrenceIndex {
        let mut index = CooccurrenceIndex::default();
        for trip in trips.iter() {
            index.register(trip);
        }
        index
    }

    /// adds a finished trip. a segment occurring more than once keeps the
    /// position of its last occurrence.
    pub fn register(&mut self, trip: &Trip) {
        let positions = self.positions.entry(trip.id).or_default();
        for (position, segment) in trip.segments().iter().enumerate() {
            self.trips_by_segment
                .entry(*segment)
                .or_default()
                .insert(trip.id);
            positions.insert(*segment, position);
        }
    }

    pub fn trips_containing(&self, segment: &Segment) -> Option<&BTreeSet<TripId>> {
        self.trips_by_segment.get(segment)
    }

    pub fn position(&self, trip_id: &TripId, segment: &Segment) -> Option<usize> {
        self.positions
            .get(trip_id)
            .and_then(|positions| positions.get(segment))
            .copied()
    }

    /// trips containing both segments, in trip id order
    pub fn shared_trips(&self, a: &Segment, b: &Segment) -> Vec<TripId> {
        match (self.trips_containing(a), self.trips_containing(b)) {
            (Some(a_trips), Some(b_trips)) => a_trips.intersection(b_trips).copied().collect(),
            _ => vec![],
        }
    }

    /// the segments used by at least one trip, sorted
    pub fn bus_used_segments(&self) -> Vec<Segment> {
        let mut segments = self.trips_by_segment.keys().copied().collect::<Vec<_>>();
        segments.sort();
        segments
    }

    pub fn n_segments(&self) -> usize {
        self.trips_by_segment.len()
    }

    pub fn n_trips(&self) -> usize {
        self.positions.len()
    }
}
