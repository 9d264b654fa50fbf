//! Utility functions for file parsing.

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open an input file as a buffered reader, decompressing `.gz` transparently.
///
/// `kind` names the input in error messages ("junction", "GPE").
pub fn open_input(path: &Path, kind: &str) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", kind, path.display()))?;

    if path.to_string_lossy().ends_with(".gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Parse a comma-separated integer list such as `100,200,` (trailing comma allowed).
pub fn parse_int_list(field: &str) -> Result<Vec<i64>> {
    field
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.trim()
                .parse::<i64>()
                .with_context(|| format!("Invalid integer in list: {:?}", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_parse_int_list() {
        assert_eq!(parse_int_list("100,200,").unwrap(), vec![100, 200]);
        assert_eq!(parse_int_list("5").unwrap(), vec![5]);
        assert!(parse_int_list("").unwrap().is_empty());
        assert!(parse_int_list("1,x,").is_err());
    }

    #[test]
    fn test_open_input_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        writeln!(encoder, "line one").unwrap();
        encoder.finish().unwrap();

        let reader = open_input(&path, "test").unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["line one".to_string()]);
    }

    #[test]
    fn test_open_input_missing() {
        let err = open_input(Path::new("/nonexistent/file.bed"), "junction")
            .err()
            .unwrap();
        assert!(err.to_string().contains("junction"));
    }
}
