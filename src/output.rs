//! Report formatting for exskip results.
//!
//! Events go to the report as tab-separated rows. Genes without events get a
//! single line on the diagnostic stream instead.

use anyhow::Result;

use std::io::Write;

use crate::types::{GeneModel, GeneOutcome, SkipEvent};

/// Report column names, first one prefixed with `#`.
pub const HEADER: [&str; 9] = [
    "#exon_skipped",
    "gene",
    "junc_pos",
    "strand",
    "sup_reads",
    "unsup_reads_5",
    "unsup_reads_3",
    "exonId_5",
    "exonId_3",
];

/// Write the report header.
pub fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", HEADER.join("\t"))?;
    Ok(())
}

/// Format a single report row.
pub fn format_output_line(event: &SkipEvent) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\texon{}\texon{}",
        event.skipped_exons.join(","),
        event.gene,
        event.junction_pos,
        event.strand,
        event.sup_reads,
        event.unsup_reads_5,
        event.unsup_reads_3,
        event.exon_id_5,
        event.exon_id_3
    )
}

/// Diagnostic line for a gene that produced no events.
pub fn diagnostic_message(gene: &GeneModel, outcome: &GeneOutcome) -> Option<String> {
    match outcome {
        GeneOutcome::UnknownChromosome => Some(format!(
            "chromosome: {} not in junctions provided",
            gene.chrom
        )),
        GeneOutcome::NoJunctions => Some(format!("Found no junction for {}", gene.name)),
        GeneOutcome::NoEvents => Some(format!("No exon skipping junctions for {}", gene.name)),
        GeneOutcome::Events(_) => None,
    }
}

/// Write one gene's outcome, rows to `out` and diagnostics to `diag`.
///
/// Returns the number of report rows written.
pub fn write_outcome<W: Write, D: Write>(
    out: &mut W,
    diag: &mut D,
    gene: &GeneModel,
    outcome: &GeneOutcome,
) -> Result<usize> {
    if let GeneOutcome::Events(events) = outcome {
        for event in events {
            writeln!(out, "{}", format_output_line(event))?;
        }
        return Ok(events.len());
    }

    if let Some(message) = diagnostic_message(gene, outcome) {
        writeln!(diag, "{}", message)?;
    }
    Ok(0)
}
