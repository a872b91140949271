use super::{MatrixError, ModeSet, TransitionMatrix, TransitionRow};
use crate::model::network::Segment;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

/// a loaded [`TransitionMatrix`] answering row and pair queries, plus the
/// persistence of that matrix as JSON.
#[derive(Default, Debug, Clone)]
pub struct MatrixStore {
    matrix: TransitionMatrix,
}

impl MatrixStore {
    pub fn new(matrix: TransitionMatrix) -> MatrixStore {
        MatrixStore { matrix }
    }

    pub fn matrix(&self) -> &TransitionMatrix {
        &self.matrix
    }

    /// the full transition row of a segment
    pub fn row(&self, segment: &Segment) -> Result<&TransitionRow, MatrixError> {
        self.matrix
            .row(segment)
            .ok_or_else(|| MatrixError::MatrixKeyNotFound(format!("segment {segment}")))
    }

    /// the most frequent intermediate segments traveled from `from` to `to`
    pub fn pair(&self, from: &Segment, to: &Segment) -> Result<&ModeSet, MatrixError> {
        self.matrix
            .get(from, to)
            .ok_or_else(|| MatrixError::MatrixKeyNotFound(format!("pair {from} -> {to}")))
    }

    pub fn load(filepath: &Path) -> Result<MatrixStore, MatrixError> {
        let filename = filepath.to_string_lossy().to_string();
        let file = File::open(filepath).map_err(|source| MatrixError::StorageIoFailure {
            filepath: filename.clone(),
            source,
        })?;
        let matrix: TransitionMatrix = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| MatrixError::SerializationFailure {
                filepath: filename.clone(),
                source,
            })?;
        log::info!(
            "loaded transition matrix with {} rows, {} entries from {}",
            matrix.n_rows(),
            matrix.n_entries(),
            filename
        );
        Ok(MatrixStore { matrix })
    }

    /// writes the matrix to a temporary sibling file, which replaces the
    /// destination by rename only once it is completely written. a failed
    /// save leaves any existing file at `filepath` untouched.
    pub fn save(&self, filepath: &Path, overwrite: bool, pretty: bool) -> Result<(), MatrixError> {
        let filename = filepath.to_string_lossy().to_string();
        if filepath.exists() && !overwrite {
            return Err(MatrixError::FileExists(filename));
        }
        let tmp_path = temporary_path(filepath);
        let result = write_matrix(&self.matrix, &tmp_path, pretty).and_then(|_| {
            std::fs::rename(&tmp_path, filepath).map_err(|source| MatrixError::StorageIoFailure {
                filepath: filename.clone(),
                source,
            })
        });
        if result.is_err() {
            if let Err(e) = std::fs::remove_file(&tmp_path) {
                log::warn!(
                    "unable to remove temporary file {}: {e}",
                    tmp_path.display()
                );
            }
            return result;
        }
        log::info!(
            "wrote transition matrix with {} rows, {} entries to {}",
            self.matrix.n_rows(),
            self.matrix.n_entries(),
            filename
        );
        Ok(())
    }
}

fn temporary_path(filepath: &Path) -> PathBuf {
    let filename = filepath
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();
    filepath.with_file_name(format!(".{filename}.tmp"))
}

fn write_matrix(matrix: &TransitionMatrix, filepath: &Path, pretty: bool) -> Result<(), MatrixError> {
    let filename = filepath.to_string_lossy().to_string();
    let io_error = |source: std::io::Error| MatrixError::StorageIoFailure {
        filepath: filename.clone(),
        source,
    };
    let file = File::create(filepath).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    let encoded = if pretty {
        serde_json::to_writer_pretty(&mut writer, matrix)
    } else {
        serde_json::to_writer(&mut writer, matrix)
    };
    encoded.map_err(|source| MatrixError::SerializationFailure {
        filepath: filename.clone(),
        source,
    })?;
    writer.flush().map_err(io_error)?;
    let file = writer.into_inner().map_err(|e| io_error(e.into_error()))?;
    file.sync_all().map_err(io_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::MatrixStore;
    use crate::model::{
        matrix::{MatrixError, TransitionMatrix},
        network::Segment,
    };

    fn s(a: i64, b: i64) -> Segment {
        Segment::from((a, b))
    }

    fn matrix() -> TransitionMatrix {
        TransitionMatrix::from_iter([
            (s(1, 2), s(5, 6), vec![s(2, 3), s(3, 5)]),
            (s(1, 2), s(3, 5), vec![s(2, 3)]),
            (s(5, 6), s(1, 2), vec![s(6, 1)]),
        ])
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().expect("test invariant: temp dir");
        let path = dir.path().join("edge_matrix.json");
        let store = MatrixStore::new(matrix());
        for pretty in [true, false] {
            if let Err(e) = store.save(&path, true, pretty) {
                panic!("{e}");
            }
            match MatrixStore::load(&path) {
                Ok(loaded) => {
                    assert_eq!(loaded.matrix(), store.matrix());
                    for (from, row) in store.matrix().iter() {
                        for (to, modes) in row.iter() {
                            assert_eq!(loaded.pair(from, to).unwrap(), modes);
                        }
                        assert_eq!(loaded.row(from).unwrap(), row);
                    }
                }
                Err(e) => panic!("{e}"),
            }
        }
        let leftovers = std::fs::read_dir(dir.path())
            .expect("test invariant: readable dir")
            .count();
        assert_eq!(leftovers, 1, "temporary file should be renamed away");
    }

    #[test]
    fn test_missing_keys_are_no_data() {
        let store = MatrixStore::new(matrix());
        match store.row(&s(9, 9)) {
            Err(e) => assert!(e.is_no_data(), "unexpected error {e}"),
            Ok(row) => panic!("expected no data, found {row:?}"),
        }
        match store.pair(&s(5, 6), &s(3, 5)) {
            Err(MatrixError::MatrixKeyNotFound(key)) => {
                assert_eq!(key, "pair (5, 6) -> (3, 5)")
            }
            other => panic!("expected no data, found {other:?}"),
        }
    }

    #[test]
    fn test_refuses_overwrite() {
        let dir = tempfile::tempdir().expect("test invariant: temp dir");
        let path = dir.path().join("edge_matrix.json");
        std::fs::write(&path, "{}").expect("test invariant: write file");
        let store = MatrixStore::new(matrix());
        assert!(matches!(
            store.save(&path, false, true),
            Err(MatrixError::FileExists(_))
        ));
        let contents = std::fs::read_to_string(&path).expect("test invariant: readable");
        assert_eq!(contents, "{}");
    }

    #[test]
    fn test_failed_save_leaves_no_partial_file() {
        let dir = tempfile::tempdir().expect("test invariant: temp dir");
        let path = dir.path().join("missing_dir").join("edge_matrix.json");
        let store = MatrixStore::new(matrix());
        assert!(matches!(
            store.save(&path, true, true),
            Err(MatrixError::StorageIoFailure { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_rejects_bad_keys() {
        let dir = tempfile::tempdir().expect("test invariant: temp dir");
        let path = dir.path().join("edge_matrix.json");
        std::fs::write(&path, r#"{"1-2": {}}"#).expect("test invariant: write file");
        assert!(matches!(
            MatrixStore::load(&path),
            Err(MatrixError::SerializationFailure { .. })
        ));
    }
}
