use super::FrequencyCounter;
use crate::model::{
    history::{CooccurrenceIndex, TripCollection},
    matrix::{MatrixError, ModeSet, TransitionMatrix},
    network::Segment,
};
use kdam::{tqdm, Bar, BarExt};
use rayon::prelude::*;
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    sync::{Arc, Mutex},
};

/// mode sets of one unordered segment pair {a, b}, one per travel order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairTransitions {
    /// most frequent segments between a and b on trips passing a first
    pub forward: Option<ModeSet>,
    /// most frequent segments between b and a on trips passing b first
    pub reverse: Option<ModeSet>,
}

type Cell = (Segment, Segment, ModeSet);

/// computes the transition matrix from the ingested trips.
///
/// the outer loop runs over every bus-used segment `a`. its candidate partners
/// are only those segments sharing a trip with it, found through the
/// co-occurrence index, so pairs that never meet are never visited. each
/// unordered pair is handled once, from its smaller segment, and fills at most
/// the two cells `[a][b]` and `[b][a]`.
///
/// with `parallelize`, segments are distributed over the rayon thread pool.
/// workers only read the trips and the index, and the cells are merged
/// afterward, so the result matches the sequential one.
pub fn build_transition_matrix(
    trips: &TripCollection,
    index: &CooccurrenceIndex,
    parallelize: bool,
) -> Result<TransitionMatrix, MatrixError> {
    let segments = index.bus_used_segments();
    let n_segments = segments.len();
    log::info!(
        "building transition matrix over {} bus-used segments from {} trips",
        n_segments,
        trips.len()
    );

    let rows: Vec<(usize, Vec<Cell>)> = if parallelize {
        let bar = Arc::new(Mutex::new(
            Bar::builder()
                .total(n_segments)
                .desc("transition matrix")
                .build()
                .map_err(MatrixError::InternalError)?,
        ));
        segments
            .par_iter()
            .map(|a| {
                let result = transitions_from(a, trips, index);
                if let Ok(mut b) = bar.clone().lock() {
                    let _ = b.update(1);
                }
                result
            })
            .collect::<Result<Vec<_>, _>>()?
    } else {
        tqdm!(
            segments.iter(),
            total = n_segments,
            desc = "transition matrix"
        )
        .map(|a| transitions_from(a, trips, index))
        .collect::<Result<Vec<_>, _>>()?
    };
    eprintln!();

    let n_connected_pairs = rows.iter().map(|(n, _)| n).sum::<usize>();
    let matrix = rows
        .into_iter()
        .flat_map(|(_, cells)| cells)
        .collect::<TransitionMatrix>();
    log::info!(
        "examined {} connected segment pairs, matrix has {} rows and {} entries",
        n_connected_pairs,
        matrix.n_rows(),
        matrix.n_entries()
    );
    Ok(matrix)
}

/// computes the mode sets for one unordered pair of segments from the trips
/// they share. positions are compared per shared trip: segments strictly
/// between the two are counted toward the order in which the trip passed them.
pub fn pair_transitions(
    a: &Segment,
    b: &Segment,
    trips: &TripCollection,
    index: &CooccurrenceIndex,
) -> Result<PairTransitions, MatrixError> {
    let mut forward = FrequencyCounter::new();
    let mut reverse = FrequencyCounter::new();
    for trip_id in index.shared_trips(a, b) {
        let trip = trips.get(&trip_id).ok_or_else(|| {
            MatrixError::InternalError(format!("trip {trip_id} is indexed but was not ingested"))
        })?;
        let missing_position = |s: &Segment| {
            MatrixError::InternalError(format!("segment {s} has no position in trip {trip_id}"))
        };
        let pos_a = index
            .position(&trip_id, a)
            .ok_or_else(|| missing_position(a))?;
        let pos_b = index
            .position(&trip_id, b)
            .ok_or_else(|| missing_position(b))?;
        match pos_a.cmp(&pos_b) {
            Ordering::Less => forward.count_between(trip.segments(), pos_a, pos_b),
            Ordering::Greater => reverse.count_between(trip.segments(), pos_b, pos_a),
            Ordering::Equal => {}
        }
    }
    Ok(PairTransitions {
        forward: forward.mode(),
        reverse: reverse.mode(),
    })
}

/// all cells contributed by pairs whose smaller segment is `a`, along with the
/// number of connected pairs examined.
fn transitions_from(
    a: &Segment,
    trips: &TripCollection,
    index: &CooccurrenceIndex,
) -> Result<(usize, Vec<Cell>), MatrixError> {
    let trip_ids = match index.trips_containing(a) {
        Some(ids) => ids,
        None => return Ok((0, vec![])),
    };
    let partners = trip_ids
        .iter()
        .filter_map(|trip_id| trips.get(trip_id))
        .flat_map(|trip| trip.segments().iter().copied())
        .filter(|b| b > a)
        .collect::<BTreeSet<_>>();

    let mut cells = vec![];
    for b in partners.iter() {
        let transitions = pair_transitions(a, b, trips, index)?;
        if let Some(modes) = transitions.forward {
            cells.push((*a, *b, modes));
        }
        if let Some(modes) = transitions.reverse {
            cells.push((*b, *a, modes));
        }
    }
    Ok((partners.len(), cells))
}
