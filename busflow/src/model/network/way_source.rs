use super::{NetworkError, RoadNetwork, WayData, WayFilter};
use crate::model::io_ops;
use itertools::Itertools;
use kdam::{tqdm, Bar, BarExt};
use osmpbf::{Element, ElementReader};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, io::BufRead, path::Path};

/// where the way records of the road network come from. parsing of the
/// underlying format is delegated: `.pbf` files go through osmpbf, anything
/// else is read as JSON lines of [`WayData`] records.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum WaySource {
    Pbf {
        pbf_filepath: String,
        way_filter: WayFilter,
    },
    JsonLines {
        filepath: String,
        way_filter: WayFilter,
    },
}

impl WaySource {
    pub fn from_filepath(filepath: &str, way_filter: WayFilter) -> WaySource {
        if filepath.ends_with(".pbf") {
            WaySource::Pbf {
                pbf_filepath: filepath.to_string(),
                way_filter,
            }
        } else {
            WaySource::JsonLines {
                filepath: filepath.to_string(),
                way_filter,
            }
        }
    }

    /// reads the accepted ways from this source, ordered by way id.
    pub fn read_ways(&self) -> Result<Vec<WayData>, NetworkError> {
        let ways = match self {
            WaySource::Pbf {
                pbf_filepath,
                way_filter,
            } => read_pbf(pbf_filepath, way_filter)?,
            WaySource::JsonLines {
                filepath,
                way_filter,
            } => read_json_lines(filepath, way_filter)?,
        };
        if ways.is_empty() {
            return Err(NetworkError::NoWaysFound);
        }
        Ok(ways)
    }

    /// reads the ways and builds the road network from them.
    pub fn import(&self) -> Result<RoadNetwork, NetworkError> {
        eprintln!();
        log::info!("  (((1))) reading way source");
        let ways = self.read_ways()?;
        log::info!("read {} ways", ways.len());

        eprintln!();
        log::info!("  (((2))) building road network");
        Ok(RoadNetwork::new(&ways))
    }
}

/// reads the Way elements of a PBF file, keeping those accepted by the filter.
/// nodes and relations are not needed for the road network and are ignored.
fn read_pbf(filepath: &str, way_filter: &WayFilter) -> Result<Vec<WayData>, NetworkError> {
    let reader = ElementReader::from_path(Path::new(filepath))
        .map_err(|source| NetworkError::PbfLibError { source })?;

    let mut ways_bar = Bar::builder()
        .desc("ways retained")
        .build()
        .map_err(NetworkError::InternalError)?;
    let mut ways_map: HashMap<i64, WayData> = HashMap::new();
    let mut ways_visited: usize = 0;
    reader
        .for_each(|e| {
            if let Element::Way(way) = e {
                ways_visited += 1;
                let w = WayData::from_pbf(&way);
                if !way_filter.accept(&w) {
                    return;
                }
                if ways_map.contains_key(&w.id.0) {
                    log::warn!("way with OSMID {} occurs more than once in this file", w.id);
                }
                let _ = ways_bar.update(1);
                ways_map.insert(w.id.0, w);
            }
        })
        .map_err(|source| NetworkError::PbfLibError { source })?;
    eprintln!();
    log::info!(
        "retained {} of {} ways in {filepath}",
        ways_map.len(),
        ways_visited
    );

    // sorted to guarantee idempotency on repeated runs
    let ways = ways_map
        .into_iter()
        .sorted_by_key(|(id, _)| *id)
        .map(|(_, w)| w)
        .collect_vec();
    Ok(ways)
}

fn read_json_lines(filepath: &str, way_filter: &WayFilter) -> Result<Vec<WayData>, NetworkError> {
    let read_error = |source: std::io::Error| NetworkError::WayReadError {
        filepath: filepath.to_string(),
        source,
    };
    let reader = io_ops::open_line_reader(Path::new(filepath)).map_err(read_error)?;
    let mut ways = vec![];
    let mut rejected: usize = 0;
    let iter = tqdm!(reader.lines().enumerate(), desc = "read way records");
    for (index, line) in iter {
        let line = line.map_err(read_error)?;
        if line.trim().is_empty() {
            continue;
        }
        let way: WayData =
            serde_json::from_str(&line).map_err(|source| NetworkError::InvalidWayRecord {
                filepath: filepath.to_string(),
                line: index + 1,
                source,
            })?;
        if way_filter.accept(&way) {
            ways.push(way);
        } else {
            rejected += 1;
        }
    }
    eprintln!();
    if rejected > 0 {
        log::info!("way filter rejected {rejected} ways in {filepath}");
    }
    ways.sort_by_key(|w| w.id);
    Ok(ways)
}

#[cfg(test)]
mod tests {
    use super::WaySource;
    use crate::model::network::{NetworkError, NodeId, WayFilter, WayId};

    #[test]
    fn test_read_json_lines() {
        let dir = tempfile::tempdir().expect("test invariant: temp dir");
        let path = dir.path().join("ways.json");
        let contents = [
            r#"{"id": 7, "nodes": [3, 4], "tags": {"highway": "primary", "oneway": "yes"}}"#,
            "",
            r#"{"id": 2, "nodes": [1, 2, 3], "tags": {"highway": "residential"}}"#,
            r#"{"id": 9, "nodes": [8, 9], "tags": {"building": "yes"}}"#,
        ]
        .join("\n");
        std::fs::write(&path, contents).expect("test invariant: write file");

        let source = WaySource::from_filepath(path.to_str().unwrap(), WayFilter::Highway);
        match source.read_ways() {
            Ok(ways) => {
                let ids = ways.iter().map(|w| w.id).collect::<Vec<_>>();
                assert_eq!(ids, vec![WayId(2), WayId(7)], "sorted, building filtered");
                assert_eq!(ways[0].nodes, vec![NodeId(1), NodeId(2), NodeId(3)]);
                assert!(ways[1].is_oneway());
            }
            Err(e) => panic!("{e}"),
        }

        match source.import() {
            Ok(network) => assert_eq!(network.n_edges(), 3),
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn test_invalid_json_line_reports_line_number() {
        let dir = tempfile::tempdir().expect("test invariant: temp dir");
        let path = dir.path().join("ways.json");
        std::fs::write(&path, "{\"id\": 1, \"nodes\": [1, 2]}\n{\"id\": \"x\"}\n")
            .expect("test invariant: write file");
        let source = WaySource::from_filepath(path.to_str().unwrap(), WayFilter::NoFilter);
        match source.read_ways() {
            Err(NetworkError::InvalidWayRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected invalid way record, found {other:?}"),
        }
    }

    #[test]
    fn test_empty_source_fails() {
        let dir = tempfile::tempdir().expect("test invariant: temp dir");
        let path = dir.path().join("ways.json");
        std::fs::write(&path, "\n").expect("test invariant: write file");
        let source = WaySource::from_filepath(path.to_str().unwrap(), WayFilter::Highway);
        assert!(matches!(source.read_ways(), Err(NetworkError::NoWaysFound)));
    }
}
