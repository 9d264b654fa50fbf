//! Junction evidence for skip hypotheses.
//!
//! A hypothesis is reported when a junction joins its flanking exons exactly
//! and at least one of the junctions of the exon-including isoform is seen
//! too. The latter give the competing read counts.

use crate::matcher::hypothesis::possible_skips;
use crate::matcher::index::JunctionIndex;
use crate::types::{GeneModel, GeneOutcome, JunctionRecord, SkipEvent, SkipHypothesis, Strand};

/// The junction joining the two flanking exons, if any.
pub fn find_supporting_junction<'j>(
    skip: &SkipHypothesis<'_>,
    junctions: &'j [JunctionRecord],
) -> Option<&'j JunctionRecord> {
    junctions
        .iter()
        .find(|j| j.donor == skip.donor && j.acceptor == skip.acceptor)
}

/// Junctions of the exon-including isoform, as `(5', 3')` in transcription order.
///
/// Returns `None` when neither side is observed. When a side matches several
/// junctions the last one in index order is kept.
pub fn find_internal_junctions<'j>(
    skip: &SkipHypothesis<'_>,
    strand: Strand,
    junctions: &'j [JunctionRecord],
) -> Option<(Option<&'j JunctionRecord>, Option<&'j JunctionRecord>)> {
    let first = skip.skipped.first()?;
    let last = skip.skipped.last()?;

    let upstream = junctions
        .iter()
        .rev()
        .find(|j| j.donor == skip.donor && j.acceptor == first.start);
    let downstream = junctions
        .iter()
        .rev()
        .find(|j| j.acceptor == skip.acceptor && j.donor == last.end);

    if upstream.is_none() && downstream.is_none() {
        return None;
    }

    match strand {
        Strand::Positive => Some((upstream, downstream)),
        Strand::Negative => Some((downstream, upstream)),
    }
}

/// Match one hypothesis against the candidate junctions of its gene.
pub fn match_skip(
    gene: &GeneModel,
    skip: &SkipHypothesis<'_>,
    junctions: &[JunctionRecord],
) -> Option<SkipEvent> {
    let supporting = find_supporting_junction(skip, junctions)?;
    let (internal_5, internal_3) = find_internal_junctions(skip, gene.strand, junctions)?;

    Some(SkipEvent {
        skipped_exons: skip.skipped.iter().map(|e| e.label(&gene.chrom)).collect(),
        gene: gene.name.clone(),
        junction_pos: supporting.position(),
        strand: gene.strand,
        sup_reads: supporting.support,
        unsup_reads_5: internal_5.map_or(0, |j| j.support),
        unsup_reads_3: internal_3.map_or(0, |j| j.support),
        exon_id_5: skip.flanking.0,
        exon_id_3: skip.flanking.1,
    })
}

/// All evidenced skip events of `gene` among `junctions`, in hypothesis order.
pub fn skip_events(gene: &GeneModel, junctions: &[JunctionRecord]) -> Vec<SkipEvent> {
    possible_skips(gene)
        .iter()
        .filter_map(|skip| match_skip(gene, skip, junctions))
        .collect()
}

/// Scan one gene model against the junction index.
pub fn scan_gene(gene: &GeneModel, index: &JunctionIndex) -> GeneOutcome {
    let junctions = match index.query_range(&gene.chrom, gene.tx_start, gene.tx_end) {
        Ok(junctions) => junctions,
        Err(_) => return GeneOutcome::UnknownChromosome,
    };

    if junctions.is_empty() {
        return GeneOutcome::NoJunctions;
    }

    let events = skip_events(gene, junctions);
    if events.is_empty() {
        GeneOutcome::NoEvents
    } else {
        GeneOutcome::Events(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Exon;

    fn junc(donor: i64, acceptor: i64, support: u32) -> JunctionRecord {
        JunctionRecord::new("chrX".to_string(), donor, acceptor, support)
    }

    fn four_exon_gene(strand: Strand) -> GeneModel {
        GeneModel::new(
            "G1".to_string(),
            "chrX".to_string(),
            strand,
            vec![
                Exon::new(100, 150),
                Exon::new(200, 250),
                Exon::new(300, 350),
                Exon::new(400, 450),
            ],
        )
    }

    #[test]
    fn test_supporting_junction_exact_match() {
        let exons = [Exon::new(200, 250)];
        let skip = SkipHypothesis {
            donor: 150,
            acceptor: 300,
            skipped: &exons,
            flanking: (1, 3),
        };
        let juncs = vec![junc(150, 301, 5), junc(150, 300, 10), junc(150, 300, 2)];
        assert_eq!(find_supporting_junction(&skip, &juncs).unwrap().support, 10);
        assert!(find_supporting_junction(&skip, &juncs[..1]).is_none());
    }

    #[test]
    fn test_internal_junctions_swap_on_minus() {
        let exons = [Exon::new(200, 250)];
        let skip = SkipHypothesis {
            donor: 150,
            acceptor: 300,
            skipped: &exons,
            flanking: (1, 3),
        };
        let juncs = vec![junc(150, 200, 3), junc(250, 300, 4)];

        let (p5, p3) = find_internal_junctions(&skip, Strand::Positive, &juncs).unwrap();
        assert_eq!((p5.unwrap().support, p3.unwrap().support), (3, 4));

        let (m5, m3) = find_internal_junctions(&skip, Strand::Negative, &juncs).unwrap();
        assert_eq!((m5.unwrap().support, m3.unwrap().support), (4, 3));
    }

    #[test]
    fn test_internal_junctions_none() {
        let exons = [Exon::new(200, 250)];
        let skip = SkipHypothesis {
            donor: 150,
            acceptor: 300,
            skipped: &exons,
            flanking: (1, 3),
        };
        let juncs = vec![junc(150, 300, 10)];
        assert!(find_internal_junctions(&skip, Strand::Positive, &juncs).is_none());
    }

    #[test]
    fn test_internal_duplicate_last_wins() {
        let exons = [Exon::new(200, 250)];
        let skip = SkipHypothesis {
            donor: 150,
            acceptor: 300,
            skipped: &exons,
            flanking: (1, 3),
        };
        let juncs = vec![junc(150, 200, 3), junc(150, 200, 8)];
        let (p5, p3) = find_internal_junctions(&skip, Strand::Positive, &juncs).unwrap();
        assert_eq!(p5.unwrap().support, 8);
        assert!(p3.is_none());
    }

    #[test]
    fn test_multi_exon_skip() {
        let gene = four_exon_gene(Strand::Positive);
        let juncs = vec![junc(150, 200, 2), junc(150, 400, 7), junc(350, 400, 5)];
        let events = skip_events(&gene, &juncs);

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.skipped_exons, vec!["chrX:200-250", "chrX:300-350"]);
        assert_eq!(event.junction_pos, "chrX:150-400");
        assert_eq!((event.sup_reads, event.unsup_reads_5, event.unsup_reads_3), (7, 2, 5));
        assert_eq!((event.exon_id_5, event.exon_id_3), (1, 4));
    }

    #[test]
    fn test_minus_strand_event() {
        let gene = four_exon_gene(Strand::Negative);
        let juncs = vec![junc(150, 200, 3), junc(150, 300, 10), junc(250, 300, 4)];
        let events = skip_events(&gene, &juncs);

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.strand, Strand::Negative);
        assert_eq!((event.unsup_reads_5, event.unsup_reads_3), (4, 3));
        assert_eq!((event.exon_id_5, event.exon_id_3), (2, 4));
    }

    #[test]
    fn test_scan_gene_outcomes() {
        let gene = four_exon_gene(Strand::Positive);

        let index = JunctionIndex::build(vec![junc(150, 200, 3)]);
        assert_eq!(scan_gene(&gene, &index), GeneOutcome::NoEvents);

        let far = JunctionIndex::build(vec![junc(5000, 6000, 3)]);
        assert_eq!(scan_gene(&gene, &far), GeneOutcome::NoJunctions);

        let other = JunctionIndex::build(vec![JunctionRecord::new("chr1".to_string(), 150, 300, 1)]);
        assert_eq!(scan_gene(&gene, &other), GeneOutcome::UnknownChromosome);
    }
}
