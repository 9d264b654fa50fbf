//! Core data structures for exskip.
//!
//! This module contains the value types shared by the parsers, the junction
//! index and the skip matcher. All of them are built once by the parser layer
//! and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

/// Strand orientation for genomic features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Positive,
    Negative,
}

/// Error type for parsing strand from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrandError;

impl fmt::Display for ParseStrandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid strand: expected '+' or '-'")
    }
}

impl std::error::Error for ParseStrandError {}

impl FromStr for Strand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Positive),
            "-" => Ok(Strand::Negative),
            _ => Err(ParseStrandError),
        }
    }
}

impl Strand {
    /// Convert strand to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Positive => "+",
            Strand::Negative => "-",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An exon as a 0-based half-open interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exon {
    pub start: i64,
    pub end: i64,
}

impl Exon {
    pub fn new(start: i64, end: i64) -> Self {
        Exon { start, end }
    }

    /// Label used in the report: `chrom:start-end`.
    pub fn label(&self, chrom: &str) -> String {
        format!("{}:{}-{}", chrom, self.start, self.end)
    }
}

/// A splice junction called from RNA-seq alignments.
///
/// `donor` is the end of the upstream aligned block and `acceptor` the start
/// of the downstream one, so `[donor, acceptor)` is the intron.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionRecord {
    pub chrom: String,
    pub donor: i64,
    pub acceptor: i64,
    /// Number of reads spanning the junction.
    pub support: u32,
}

impl JunctionRecord {
    pub fn new(chrom: String, donor: i64, acceptor: i64, support: u32) -> Self {
        JunctionRecord {
            chrom,
            donor,
            acceptor,
            support,
        }
    }

    /// Position string `chrom:donor-acceptor`.
    pub fn position(&self) -> String {
        format!("{}:{}-{}", self.chrom, self.donor, self.acceptor)
    }
}

/// A transcript model from a genePredExt annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneModel {
    pub name: String,
    pub chrom: String,
    pub strand: Strand,
    pub tx_start: i64,
    pub tx_end: i64,
    /// Exons in ascending genomic order regardless of strand.
    pub exons: Vec<Exon>,
}

impl GeneModel {
    /// Create a gene model, deriving its span from the first and last exon.
    ///
    /// `exons` must be non-empty and sorted ascending.
    pub fn new(name: String, chrom: String, strand: Strand, exons: Vec<Exon>) -> Self {
        let tx_start = exons.first().map_or(0, |e| e.start);
        let tx_end = exons.last().map_or(0, |e| e.end);
        GeneModel {
            name,
            chrom,
            strand,
            tx_start,
            tx_end,
            exons,
        }
    }

    pub fn exon_count(&self) -> usize {
        self.exons.len()
    }
}

/// A candidate skip of exons `i+1..j` of a gene, bridged by `donor..acceptor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipHypothesis<'a> {
    pub donor: i64,
    pub acceptor: i64,
    /// Skipped exons in genomic order (never empty).
    pub skipped: &'a [Exon],
    /// 1-based ids of the 5' and 3' flanking exons, in transcription order.
    pub flanking: (usize, usize),
}

/// One reported exon skipping event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipEvent {
    pub skipped_exons: Vec<String>,
    pub gene: String,
    pub junction_pos: String,
    pub strand: Strand,
    pub sup_reads: u32,
    pub unsup_reads_5: u32,
    pub unsup_reads_3: u32,
    pub exon_id_5: usize,
    pub exon_id_3: usize,
}

/// What scanning one gene produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneOutcome {
    /// The gene's chromosome has no junctions at all.
    UnknownChromosome,
    /// No junction falls inside the gene span.
    NoJunctions,
    /// Junctions overlap the gene but none supports a skip.
    NoEvents,
    Events(Vec<SkipEvent>),
}
