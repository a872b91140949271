use super::FrequencyCounter;
use crate::model::{
    history::{trip_segmenter, HistoryError, HistoryRecord, IngestSummary},
    matrix::ModeSet,
    network::{Segment, SegmentLookup},
};

/// outcome of a direct corpus scan for one ordered segment pair
#[derive(Debug, Clone, Default)]
pub struct PointQueryResult {
    /// most frequent intermediate segments, or None when no trip passed
    /// anything between the two segments in this order
    pub modes: Option<ModeSet>,
    /// trips on which `from` was followed by `to`
    pub supporting_trips: usize,
    pub summary: IngestSummary,
}

/// recomputes the mode set of the ordered pair (`from`, `to`) by replaying the
/// movement records without building trips or the co-occurrence index.
///
/// each path is segmented exactly as during ingestion, so the result equals
/// the `[from][to]` cell of a matrix built from the same records. malformed
/// records are counted and skipped; read failures end the scan.
pub fn most_frequent_between<I>(
    records: I,
    lookup: &SegmentLookup,
    from: &Segment,
    to: &Segment,
) -> Result<PointQueryResult, HistoryError>
where
    I: IntoIterator<Item = Result<HistoryRecord, HistoryError>>,
{
    let mut counter = FrequencyCounter::new();
    let mut summary = IngestSummary::default();
    let mut supporting_trips: usize = 0;

    for row in records {
        let record = match row {
            Ok(record) => record,
            Err(e @ HistoryError::MalformedRecord { .. }) => {
                log::warn!("{e}");
                summary.malformed_records += 1;
                continue;
            }
            Err(e) => return Err(e),
        };
        summary.records += 1;
        for path in record.trip_list.iter() {
            summary.paths += 1;
            let fragments = match path.fragments() {
                Some(f) => f,
                None => {
                    summary.empty_paths += 1;
                    continue;
                }
            };
            for trip in trip_segmenter::segment_path(fragments, lookup, &mut summary) {
                summary.trips += 1;
                let pos_from = trip.iter().position(|s| s == from);
                let pos_to = trip.iter().position(|s| s == to);
                if let (Some(start), Some(end)) = (pos_from, pos_to) {
                    if start < end {
                        supporting_trips += 1;
                        counter.count_between(&trip, start, end);
                    }
                }
            }
        }
    }

    log::info!(
        "scanned {summary}; {supporting_trips} trips travel {from} before {to}"
    );
    Ok(PointQueryResult {
        modes: counter.mode(),
        supporting_trips,
        summary,
    })
}
