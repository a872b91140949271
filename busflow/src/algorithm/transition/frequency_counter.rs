use crate::model::{matrix::ModeSet, network::Segment};
use std::collections::HashMap;

/// counts how often each segment appears between two observed segments.
#[derive(Default, Debug, Clone)]
pub struct FrequencyCounter {
    counts: HashMap<Segment, usize>,
}

impl FrequencyCounter {
    pub fn new() -> FrequencyCounter {
        FrequencyCounter::default()
    }

    /// counts every segment of `trip` strictly between `start` and `end`.
    /// adjacent or unordered positions add nothing.
    pub fn count_between(&mut self, trip: &[Segment], start: usize, end: usize) {
        if start + 1 >= end || end > trip.len() {
            return;
        }
        for segment in trip[start + 1..end].iter() {
            *self.counts.entry(*segment).or_insert(0) += 1;
        }
    }

    pub fn get(&self, segment: &Segment) -> Option<usize> {
        self.counts.get(segment).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// every segment attaining the highest count, sorted. ties are all kept.
    /// None when nothing was counted.
    pub fn mode(&self) -> Option<ModeSet> {
        let max_count = self.counts.values().max()?;
        let mut modes = self
            .counts
            .iter()
            .filter(|(_, count)| *count == max_count)
            .map(|(segment, _)| *segment)
            .collect::<Vec<_>>();
        modes.sort();
        Some(modes)
    }
}

#[cfg(test)]
mod tests {
    use super::FrequencyCounter;
    use crate::model::network::Segment;

    fn s(a: i64, b: i64) -> Segment {
        Segment::from((a, b))
    }

    #[test]
    fn test_empty_counter_has_no_mode() {
        let mut counter = FrequencyCounter::new();
        counter.count_between(&[s(1, 2), s(2, 3)], 0, 1);
        assert!(counter.is_empty());
        assert_eq!(counter.mode(), None);
    }

    #[test]
    fn test_ties_are_retained() {
        let mut counter = FrequencyCounter::new();
        counter.count_between(&[s(1, 2), s(2, 3), s(3, 4)], 0, 2);
        counter.count_between(&[s(1, 2), s(2, 9), s(3, 4)], 0, 2);
        assert_eq!(counter.get(&s(2, 3)), Some(1));
        assert_eq!(counter.get(&s(2, 9)), Some(1));
        assert_eq!(counter.mode(), Some(vec![s(2, 3), s(2, 9)]));
    }

    #[test]
    fn test_single_mode() {
        let mut counter = FrequencyCounter::new();
        let trip = [s(1, 2), s(2, 3), s(3, 4), s(4, 5)];
        counter.count_between(&trip, 0, 3);
        counter.count_between(&trip, 1, 3);
        assert_eq!(counter.mode(), Some(vec![s(3, 4)]));
    }
}
