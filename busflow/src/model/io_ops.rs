use flate2::read::MultiGzDecoder;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// opens a line-oriented input file, transparently decompressing it when
/// the filename ends with `.gz`.
pub fn open_line_reader(filepath: &Path) -> Result<Box<dyn BufRead + Send>, std::io::Error> {
    let file = File::open(filepath)?;
    let is_gzip = filepath
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);
    if is_gzip {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::open_line_reader;
    use flate2::{write::GzEncoder, Compression};
    use std::{fs::File, io::BufRead, io::Write};

    #[test]
    fn test_reads_plain_and_gzip() {
        let dir = tempfile::tempdir().expect("test invariant: temp dir");
        let plain = dir.path().join("lines.json");
        std::fs::write(&plain, "a\nb\n").expect("test invariant: write file");

        let gz = dir.path().join("lines.json.gz");
        let mut encoder = GzEncoder::new(
            File::create(&gz).expect("test invariant: create file"),
            Compression::default(),
        );
        encoder.write_all(b"a\nb\n").expect("test invariant: write gz");
        encoder.finish().expect("test invariant: finish gz");

        for path in [plain, gz] {
            let lines = open_line_reader(&path)
                .expect("test invariant: readable")
                .lines()
                .collect::<Result<Vec<_>, _>>()
                .expect("test invariant: valid utf8");
            assert_eq!(lines, vec!["a", "b"], "reading {}", path.display());
        }
    }
}
