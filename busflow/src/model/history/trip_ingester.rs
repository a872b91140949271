use super::{
    trip_segmenter, CooccurrenceIndex, HistoryError, HistoryRecord, IngestSummary, Trip, TripId,
};
use crate::model::network::{Segment, SegmentLookup};
use kdam::{tqdm, Bar, BarExt};
use rayon::prelude::*;
use std::sync::{Arc, Mutex};

/// one ingestion pass over movement records. the trip buffer and the trip id
/// counter belong to the pass, so independent passes may run side by side and
/// be merged afterward with [`TripCollection::merge`].
pub struct TripIngester<'a> {
    lookup: &'a SegmentLookup,
    trips: Vec<Trip>,
    summary: IngestSummary,
}

impl<'a> TripIngester<'a> {
    pub fn new(lookup: &'a SegmentLookup) -> TripIngester<'a> {
        TripIngester {
            lookup,
            trips: vec![],
            summary: IngestSummary::default(),
        }
    }

    pub fn ingest_record(&mut self, record: &HistoryRecord) {
        self.summary.records += 1;
        for path in record.trip_list.iter() {
            self.summary.paths += 1;
            let fragments = match path.fragments() {
                Some(f) => f,
                None => {
                    self.summary.empty_paths += 1;
                    continue;
                }
            };
            for segments in trip_segmenter::segment_path(fragments, self.lookup, &mut self.summary)
            {
                self.finalize(segments);
            }
        }
    }

    fn finalize(&mut self, segments: Vec<Segment>) {
        let trip_id = TripId(self.trips.len());
        self.trips.push(Trip::new(trip_id, segments));
        self.summary.trips += 1;
    }

    pub fn finish(self) -> TripCollection {
        TripCollection {
            trips: self.trips,
            summary: self.summary,
        }
    }
}

/// the trips produced by ingestion. trip ids are dense: the trip with id `i`
/// is stored at index `i`.
#[derive(Default, Debug, Clone)]
pub struct TripCollection {
    trips: Vec<Trip>,
    pub summary: IngestSummary,
}

impl TripCollection {
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn get(&self, trip_id: &TripId) -> Option<&Trip> {
        self.trips.get(trip_id.0)
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// appends the trips of another pass, offsetting its trip ids by the
    /// number of trips already held.
    pub fn merge(mut self, other: TripCollection) -> TripCollection {
        let offset = self.trips.len();
        self.trips.extend(
            other
                .trips
                .into_iter()
                .map(|trip| Trip::new(TripId(trip.id.0 + offset), trip.segments().to_vec())),
        );
        self.summary += other.summary;
        self
    }

    pub fn build_index(&self) -> CooccurrenceIndex {
        CooccurrenceIndex::new(&self.trips)
    }
}

/// ingests all records into trips. with `parallelize`, the records are cut into
/// shards of `chunk_size` which are ingested concurrently and merged in record
/// order, which yields the same trips and trip ids as a sequential pass.
pub fn ingest_records(
    records: &[HistoryRecord],
    lookup: &SegmentLookup,
    parallelize: bool,
    chunk_size: usize,
) -> Result<TripCollection, HistoryError> {
    let chunk_size = chunk_size.max(1);
    let collection = if parallelize {
        let bar = Arc::new(Mutex::new(
            Bar::builder()
                .total(records.len())
                .desc("ingest movement records")
                .build()
                .map_err(HistoryError::InternalError)?,
        ));
        let shards = records
            .par_chunks(chunk_size)
            .map(|chunk| {
                let mut ingester = TripIngester::new(lookup);
                for record in chunk.iter() {
                    ingester.ingest_record(record);
                }
                if let Ok(mut b) = bar.clone().lock() {
                    let _ = b.update(chunk.len());
                }
                ingester.finish()
            })
            .collect::<Vec<_>>();
        shards
            .into_iter()
            .fold(TripCollection::default(), TripCollection::merge)
    } else {
        let mut ingester = TripIngester::new(lookup);
        let iter = tqdm!(
            records.iter(),
            total = records.len(),
            desc = "ingest movement records"
        );
        for record in iter {
            ingester.ingest_record(record);
        }
        ingester.finish()
    };
    eprintln!();

    let longest = collection.trips.iter().map(Trip::len).max().unwrap_or_default();
    log::info!(
        "ingested {} (longest trip has {} segments)",
        collection.summary,
        longest
    );
    Ok(collection)
}
