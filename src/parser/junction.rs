//! Junction BED12 parser with gzip support.
//!
//! Reads the `junctions.bed` produced by TopHat-style aligners. Each record is
//! a two-block BED12 feature whose gap is the intron; the score column holds
//! the number of supporting reads.

use anyhow::{bail, Context, Result};
use std::io::BufRead;
use std::path::Path;

use crate::parser::util::{open_input, parse_int_list};
use crate::types::JunctionRecord;

/// Parse a junction BED12 file into records, in file order.
///
/// Supports both plain text and gzip-compressed files.
pub fn parse_junctions(path: &Path) -> Result<Vec<JunctionRecord>> {
    let reader = open_input(path, "junction")?;
    parse_junctions_reader(reader)
        .with_context(|| format!("Failed to parse junction file: {}", path.display()))
}

/// Parse junction records from a reader.
pub fn parse_junctions_reader<R: BufRead>(reader: R) -> Result<Vec<JunctionRecord>> {
    let mut junctions = Vec::new();

    for (line_no, line_result) in reader.lines().enumerate() {
        let line = line_result.context("Failed to read junction line")?;
        let trimmed = line.trim_end();

        if is_skippable(trimmed) {
            continue;
        }

        let junction = parse_junction_line(trimmed)
            .with_context(|| format!("Malformed junction at line {}", line_no + 1))?;
        junctions.push(junction);
    }

    Ok(junctions)
}

/// Comments, track headers and blank lines carry no junction.
fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with("track name=")
}

/// Parse a single BED12 line into a junction.
///
/// donor = chromStart + blockSizes[0], acceptor = chromStart + blockStarts[1].
pub fn parse_junction_line(line: &str) -> Result<JunctionRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 12 {
        bail!("expected 12 BED columns, found {}", fields.len());
    }

    let chrom = fields[0].to_string();
    let chrom_start: i64 = fields[1]
        .parse()
        .context("Failed to parse chromStart")?;
    let support: u32 = fields[4].parse().context("Failed to parse score")?;
    let block_count: usize = fields[9]
        .parse()
        .context("Failed to parse blockCount")?;
    let block_sizes = parse_int_list(fields[10]).context("Failed to parse blockSizes")?;
    let block_starts = parse_int_list(fields[11]).context("Failed to parse blockStarts")?;

    if block_count < 2 || block_sizes.len() < 2 || block_starts.len() < 2 {
        bail!("a junction needs two blocks, found {}", block_count);
    }

    let donor = chrom_start
        .checked_add(block_sizes[0])
        .context("coordinate overflow")?;
    let acceptor = chrom_start
        .checked_add(block_starts[1])
        .context("coordinate overflow")?;
    if donor >= acceptor {
        bail!("donor {} is not before acceptor {}", donor, acceptor);
    }

    Ok(JunctionRecord::new(chrom, donor, acceptor, support))
}
