//! Skip hypothesis enumeration.
//!
//! Every pair of non-adjacent exons `(i, j)` of a gene model is a possible
//! skip of exons `i+1..j`. No junction evidence is consulted here.

use crate::types::{GeneModel, SkipHypothesis, Strand};

/// 1-based ids of the exons flanking a skip of `i+1..j`, in transcription order.
///
/// On the minus strand exon 1 is the genomically last exon, so the ids are
/// mirrored and the 5' flank is the exon at `j`.
pub fn flanking_exon_ids(i: usize, j: usize, exon_count: usize, strand: Strand) -> (usize, usize) {
    match strand {
        Strand::Positive => (i + 1, j + 1),
        Strand::Negative => (exon_count - j, exon_count - i),
    }
}

/// Number of hypotheses produced for a gene with `exon_count` exons.
pub fn hypothesis_count(exon_count: usize) -> usize {
    if exon_count < 2 {
        0
    } else {
        (exon_count - 1) * (exon_count - 2) / 2
    }
}

/// All possible exon skips of `gene`, ordered by 5' genomic exon then 3' genomic exon.
pub fn possible_skips(gene: &GeneModel) -> Vec<SkipHypothesis<'_>> {
    let exons = &gene.exons;
    let n = exons.len();
    let mut skips = Vec::with_capacity(hypothesis_count(n));

    for i in 0..n {
        for j in (i + 2)..n {
            skips.push(SkipHypothesis {
                donor: exons[i].end,
                acceptor: exons[j].start,
                skipped: &exons[i + 1..j],
                flanking: flanking_exon_ids(i, j, n, gene.strand),
            });
        }
    }

    skips
}
