//! exskip - Exon skipping detection library.
//!
//! This library finds exon skipping events by matching RNA-seq splice
//! junctions (TopHat `junctions.bed`) against gene models (genePredExt).
//!
//! # Features
//!
//! - Parse junction BED12 and GPE files (with gzip support)
//! - Index junctions per chromosome for binary-search range retrieval
//! - Enumerate every skip of one or more consecutive exons per gene
//! - Report skipping and exon-including junction support in transcription order
//!
//! # Example
//!
//! ```ignore
//! use exskip::matcher::{scan_gene, JunctionIndex};
//! use exskip::output::{write_header, write_outcome};
//! use exskip::parser::{parse_junctions, GpeReader};
//! use std::path::Path;
//!
//! let index = JunctionIndex::build(parse_junctions(Path::new("junctions.bed"))?);
//! let genes = GpeReader::new(Path::new("genes.gpe"), false)?.read_all()?;
//!
//! let mut out = std::io::stdout();
//! let mut diag = std::io::stderr();
//! write_header(&mut out)?;
//! for gene in &genes {
//!     write_outcome(&mut out, &mut diag, gene, &scan_gene(gene, &index))?;
//! }
//! ```

pub mod config;
pub mod matcher;
pub mod output;
pub mod parser;
pub mod types;

pub use config::Config;
pub use matcher::JunctionIndex;
pub use parser::GpeReader;
pub use types::{Exon, GeneModel, GeneOutcome, JunctionRecord, SkipEvent, SkipHypothesis, Strand};
