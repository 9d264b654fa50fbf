//! genePredExt (GPE) parser with gzip support.
//!
//! Each line is one transcript model. The UCSC `bin` column is optional and
//! must be announced by the caller since it cannot be told apart reliably
//! from the data.

use anyhow::{bail, Context, Result};
use std::io::BufRead;
use std::path::Path;

use crate::parser::util::{open_input, parse_int_list};
use crate::types::{Exon, GeneModel, Strand};

/// Streaming GPE reader for chunked processing.
///
/// Gene models come back in file order so reports stay in annotation order.
pub struct GpeReader {
    reader: Box<dyn BufRead + Send>,
    has_bin: bool,
    line_no: usize,
}

impl GpeReader {
    /// Create a new GpeReader from a file path (supports .gz).
    pub fn new(path: &Path, has_bin: bool) -> Result<Self> {
        let reader = open_input(path, "GPE")?;
        Ok(Self::from_reader(reader, has_bin))
    }

    /// Wrap an already opened reader.
    pub fn from_reader(reader: Box<dyn BufRead + Send>, has_bin: bool) -> Self {
        GpeReader {
            reader,
            has_bin,
            line_no: 0,
        }
    }

    /// Read the next chunk of gene models.
    ///
    /// Returns `None` when EOF is reached.
    pub fn read_chunk(&mut self, size: usize) -> Result<Option<Vec<GeneModel>>> {
        let mut genes = Vec::with_capacity(size);
        let mut line = String::new();

        while genes.len() < size {
            line.clear();
            let bytes_read = self
                .reader
                .read_line(&mut line)
                .context("Failed to read GPE line")?;

            if bytes_read == 0 {
                break;
            }
            self.line_no += 1;

            let trimmed = line.trim_end();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let gene = parse_gpe_line(trimmed, self.has_bin)
                .with_context(|| format!("Malformed GPE record at line {}", self.line_no))?;
            genes.push(gene);
        }

        if genes.is_empty() {
            Ok(None)
        } else {
            Ok(Some(genes))
        }
    }

    /// Drain the rest of the input.
    pub fn read_all(&mut self) -> Result<Vec<GeneModel>> {
        let mut genes = Vec::new();
        while let Some(chunk) = self.read_chunk(1024)? {
            genes.extend(chunk);
        }
        Ok(genes)
    }
}

/// Parse one GPE line.
///
/// Columns (after the optional bin): name, chrom, strand, txStart, txEnd,
/// cdsStart, cdsEnd, exonCount, exonStarts, exonEnds, ...
pub fn parse_gpe_line(line: &str, has_bin: bool) -> Result<GeneModel> {
    let fields: Vec<&str> = line.split('\t').collect();
    let offset = usize::from(has_bin);

    if fields.len() < offset + 10 {
        bail!(
            "expected at least {} columns, found {}",
            offset + 10,
            fields.len()
        );
    }
    let fields = &fields[offset..];

    let name = fields[0].to_string();
    let chrom = fields[1].to_string();
    let strand: Strand = fields[2]
        .parse()
        .with_context(|| format!("Bad strand {:?} for {}", fields[2], name))?;
    let exon_count: usize = fields[7]
        .parse()
        .with_context(|| format!("Failed to parse exonCount for {}", name))?;
    let starts = parse_int_list(fields[8]).context("Failed to parse exonStarts")?;
    let ends = parse_int_list(fields[9]).context("Failed to parse exonEnds")?;

    if exon_count == 0 {
        bail!("{} has no exons", name);
    }
    if starts.len() != exon_count || ends.len() != exon_count {
        bail!(
            "{} declares {} exons but lists {} starts and {} ends",
            name,
            exon_count,
            starts.len(),
            ends.len()
        );
    }

    let exons: Vec<Exon> = starts
        .into_iter()
        .zip(ends)
        .map(|(start, end)| Exon::new(start, end))
        .collect();

    for exon in &exons {
        if exon.start >= exon.end {
            bail!("{} has an empty exon {}-{}", name, exon.start, exon.end);
        }
    }
    for pair in exons.windows(2) {
        if pair[1].start < pair[0].end {
            bail!(
                "{} has unsorted or overlapping exons at {}-{}",
                name,
                pair[1].start,
                pair[1].end
            );
        }
    }

    Ok(GeneModel::new(name, chrom, strand, exons))
}
