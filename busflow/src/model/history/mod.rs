mod cooccurrence_index;
mod history_error;
mod history_record;
mod history_source;
mod ingest_summary;
mod raw_node_id;
mod trip;
mod trip_ingester;
pub mod trip_segmenter;

pub use cooccurrence_index::CooccurrenceIndex;
pub use history_error::HistoryError;
pub use history_record::{HistoryRecord, MovementPath, PathFragment};
pub use history_source::{HistoryRecordIter, HistorySource};
pub use ingest_summary::IngestSummary;
pub use raw_node_id::RawNodeId;
pub use trip::{Trip, TripId};
pub use trip_ingester::{ingest_records, TripCollection, TripIngester};
pub use trip_segmenter::TripSegmenter;
