use super::{MatrixSummary, NetworkSummary, RunReport};
use crate::{
    algorithm::transition,
    config::BusflowConfiguration,
    model::{
        history::{self, HistorySource, TripCollection},
        matrix::{MatrixError, MatrixStore},
        network::{RoadNetwork, SegmentLookup, WaySource},
        BusflowCliError,
    },
};
use std::path::Path;

/// reads the ways file and builds the network along with its fragment lookup.
pub fn load_network(
    ways_file: &str,
    conf: &BusflowConfiguration,
) -> Result<(RoadNetwork, SegmentLookup), BusflowCliError> {
    let source = WaySource::from_filepath(ways_file, conf.way_filter.clone());
    let network = source.import()?;

    eprintln!();
    log::info!("  (((3))) canonicalizing edge fragments");
    let lookup = SegmentLookup::new(&network);
    Ok((network, lookup))
}

/// runs the full batch pipeline: road network, trip ingestion, co-occurrence
/// index, transition matrix, and finally writes the matrix to `output_file`.
pub fn run_build(
    ways_file: &str,
    history_file: &str,
    output_file: &str,
    conf: &BusflowConfiguration,
) -> Result<RunReport, BusflowCliError> {
    let output_path = Path::new(output_file);
    if output_path.exists() && !conf.overwrite {
        return Err(MatrixError::FileExists(output_file.to_string()).into());
    }

    let (network, lookup) = load_network(ways_file, conf)?;
    let trips = ingest(history_file, &lookup, conf)?;

    eprintln!();
    log::info!("  (((5))) indexing segment co-occurrence");
    let index = trips.build_index();
    log::info!(
        "{} bus-used segments across {} trips",
        index.n_segments(),
        index.n_trips()
    );

    eprintln!();
    log::info!("  (((6))) building transition matrix");
    let matrix = transition::build_transition_matrix(&trips, &index, conf.parallelize)?;

    eprintln!();
    log::info!("  (((7))) writing transition matrix to {output_file}");
    let summary = MatrixSummary::from(&matrix);
    let store = MatrixStore::new(matrix);
    store.save(output_path, conf.overwrite, conf.pretty)?;

    Ok(RunReport {
        network: NetworkSummary::new(&network, &lookup),
        ingest: Some(trips.summary),
        bus_used_segments: Some(index.n_segments()),
        matrix: Some(summary),
    })
}

/// reports network statistics and, when a history file is given, ingestion
/// statistics, without building the transition matrix.
pub fn run_summary(
    ways_file: &str,
    history_file: Option<&str>,
    conf: &BusflowConfiguration,
) -> Result<RunReport, BusflowCliError> {
    let (network, lookup) = load_network(ways_file, conf)?;
    let mut report = RunReport {
        network: NetworkSummary::new(&network, &lookup),
        ..Default::default()
    };
    if let Some(f) = history_file {
        let trips = ingest(f, &lookup, conf)?;
        report.bus_used_segments = Some(trips.build_index().n_segments());
        report.ingest = Some(trips.summary);
    }
    Ok(report)
}

fn ingest(
    history_file: &str,
    lookup: &SegmentLookup,
    conf: &BusflowConfiguration,
) -> Result<TripCollection, BusflowCliError> {
    eprintln!();
    log::info!("  (((4))) ingesting movement history from {history_file}");
    let (records, malformed) = HistorySource::new(history_file).read_records()?;
    let mut trips = history::ingest_records(
        &records,
        lookup,
        conf.parallelize,
        conf.get_ingest_chunk_size(),
    )?;
    trips.summary.malformed_records += malformed;
    if malformed > 0 {
        log::warn!("skipped {malformed} malformed movement records");
    }
    Ok(trips)
}
