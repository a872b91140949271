use super::{HistoryError, HistoryRecord};
use crate::model::io_ops;
use std::{
    io::{BufRead, Split},
    path::Path,
};

/// a JSON-lines movement history file, optionally gzip-compressed.
#[derive(Debug, Clone)]
pub struct HistorySource {
    filepath: String,
}

impl HistorySource {
    pub fn new(filepath: &str) -> HistorySource {
        HistorySource {
            filepath: filepath.to_string(),
        }
    }

    /// streams the records of the file. each item is either a record or the
    /// reason that line could not be used; [`HistoryError::MalformedRecord`]
    /// items may be skipped, while read errors end the stream.
    pub fn iter(&self) -> Result<HistoryRecordIter, HistoryError> {
        let reader = io_ops::open_line_reader(Path::new(&self.filepath)).map_err(|source| {
            HistoryError::ReadError {
                filepath: self.filepath.clone(),
                source,
            }
        })?;
        Ok(HistoryRecordIter {
            filepath: self.filepath.clone(),
            lines: reader.split(b'\n'),
            line_number: 0,
        })
    }

    /// reads all well-formed records into memory. malformed records are logged,
    /// skipped and counted in the returned tally.
    pub fn read_records(&self) -> Result<(Vec<HistoryRecord>, usize), HistoryError> {
        let mut records = vec![];
        let mut malformed: usize = 0;
        for row in self.iter()? {
            match row {
                Ok(record) => records.push(record),
                Err(e @ HistoryError::MalformedRecord { .. }) => {
                    log::warn!("{}: {e}", self.filepath);
                    malformed += 1;
                }
                Err(e) => return Err(e),
            }
        }
        log::info!(
            "read {} movement records from {} ({} malformed)",
            records.len(),
            self.filepath,
            malformed
        );
        Ok((records, malformed))
    }
}

pub struct HistoryRecordIter {
    filepath: String,
    lines: Split<Box<dyn BufRead + Send>>,
    line_number: usize,
}

impl Iterator for HistoryRecordIter {
    type Item = Result<HistoryRecord, HistoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;
            let line = match line {
                Ok(l) => l,
                Err(source) => {
                    return Some(Err(HistoryError::ReadError {
                        filepath: self.filepath.clone(),
                        source,
                    }))
                }
            };
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            // invalid UTF-8 is a malformed record, not a read failure
            let record = serde_json::from_slice::<HistoryRecord>(&line).map_err(|source| {
                HistoryError::MalformedRecord {
                    line: self.line_number,
                    source,
                }
            });
            return Some(record);
        }
    }
}
