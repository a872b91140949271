use crate::{
    algorithm::transition::{self, PointQueryResult},
    config::BusflowConfiguration,
    model::{
        history::HistorySource,
        matrix::{MatrixStore, ModeSet, TransitionRow},
        network::Segment,
        BusflowCliError,
    },
};
use std::{path::Path, str::FromStr};

/// full row of `segment` from a persisted matrix
pub fn run_row(matrix_file: &str, segment: &str) -> Result<TransitionRow, BusflowCliError> {
    let segment = Segment::from_str(segment)?;
    let store = MatrixStore::load(Path::new(matrix_file))?;
    let row = store.row(&segment)?;
    Ok(row.clone())
}

/// intermediate segments of the ordered pair from a persisted matrix
pub fn run_pair(matrix_file: &str, from: &str, to: &str) -> Result<ModeSet, BusflowCliError> {
    let from = Segment::from_str(from)?;
    let to = Segment::from_str(to)?;
    let store = MatrixStore::load(Path::new(matrix_file))?;
    let modes = store.pair(&from, &to)?;
    Ok(modes.clone())
}

/// recomputes the ordered pair directly from the movement history.
pub fn run_between(
    ways_file: &str,
    history_file: &str,
    from: &str,
    to: &str,
    conf: &BusflowConfiguration,
) -> Result<PointQueryResult, BusflowCliError> {
    let from = Segment::from_str(from)?;
    let to = Segment::from_str(to)?;
    let (_, lookup) = super::load_network(ways_file, conf)?;

    eprintln!();
    log::info!("  (((4))) scanning movement history for {from} -> {to}");
    let records = HistorySource::new(history_file).iter()?;
    let result = transition::most_frequent_between(records, &lookup, &from, &to)?;
    log::info!(
        "{} supporting trips, scanned {}",
        result.supporting_trips,
        result.summary
    );
    Ok(result)
}
