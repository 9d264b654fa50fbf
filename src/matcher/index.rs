//! Genome-sorted junction index.
//!
//! Junctions are grouped by chromosome and each group is sorted by donor,
//! then acceptor. A gene's candidate junctions are the contiguous run between
//! the first junction that can still reach the gene start and the last
//! junction that starts before the gene end.

use ahash::AHashMap;
use std::fmt;

use crate::types::JunctionRecord;

/// Error returned when a chromosome has no junctions in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromosomeNotFound(pub String);

impl fmt::Display for ChromosomeNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chromosome: {} not in junctions provided", self.0)
    }
}

impl std::error::Error for ChromosomeNotFound {}

/// Junctions of one chromosome.
#[derive(Debug, Clone, Default)]
pub struct ChromJunctions {
    junctions: Vec<JunctionRecord>,
    /// `reach[i]` is the largest acceptor among `junctions[..=i]`.
    reach: Vec<i64>,
}

impl ChromJunctions {
    fn from_unsorted(mut junctions: Vec<JunctionRecord>) -> Self {
        junctions.sort_by(|a, b| a.donor.cmp(&b.donor).then(a.acceptor.cmp(&b.acceptor)));

        let reach = junctions
            .iter()
            .scan(i64::MIN, |max, j| {
                *max = (*max).max(j.acceptor);
                Some(*max)
            })
            .collect();

        ChromJunctions { junctions, reach }
    }

    pub fn junctions(&self) -> &[JunctionRecord] {
        &self.junctions
    }

    pub fn len(&self) -> usize {
        self.junctions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }

    /// First index whose junction has `acceptor >= pos`, or `len()` if none.
    ///
    /// Acceptors are only ordered within runs of equal donors, so the search
    /// runs over their running maximum, which first reaches `pos` exactly at
    /// the first qualifying junction.
    pub fn lower_bound(&self, pos: i64) -> usize {
        self.reach.partition_point(|&max_acceptor| max_acceptor < pos)
    }

    /// Last index whose junction has `donor <= pos`.
    ///
    /// Returns `None` when every junction starts after `pos`.
    pub fn upper_bound(&self, pos: i64) -> Option<usize> {
        self.junctions
            .partition_point(|j| j.donor <= pos)
            .checked_sub(1)
    }

    /// Junctions that may take part in events inside `[start, end]`.
    ///
    /// Every junction overlapping the window is included; junctions lying
    /// between overlapping ones in sort order may be included too.
    pub fn range(&self, start: i64, end: i64) -> &[JunctionRecord] {
        let lo = self.lower_bound(start);
        match self.upper_bound(end) {
            Some(hi) if lo <= hi => &self.junctions[lo..=hi],
            _ => &[],
        }
    }
}

/// Junctions grouped by chromosome, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct JunctionIndex {
    by_chrom: AHashMap<String, ChromJunctions>,
}

impl JunctionIndex {
    /// Group junctions by chromosome and sort each group.
    pub fn build(junctions: Vec<JunctionRecord>) -> Self {
        let mut grouped: AHashMap<String, Vec<JunctionRecord>> = AHashMap::new();
        for junction in junctions {
            grouped
                .entry(junction.chrom.clone())
                .or_default()
                .push(junction);
        }

        let by_chrom = grouped
            .into_iter()
            .map(|(chrom, juncs)| (chrom, ChromJunctions::from_unsorted(juncs)))
            .collect();

        JunctionIndex { by_chrom }
    }

    pub fn chrom(&self, chrom: &str) -> Option<&ChromJunctions> {
        self.by_chrom.get(chrom)
    }

    /// Candidate junctions on `chrom` for the span `[tx_start, tx_end]`.
    pub fn query_range(
        &self,
        chrom: &str,
        tx_start: i64,
        tx_end: i64,
    ) -> Result<&[JunctionRecord], ChromosomeNotFound> {
        self.by_chrom
            .get(chrom)
            .map(|group| group.range(tx_start, tx_end))
            .ok_or_else(|| ChromosomeNotFound(chrom.to_string()))
    }

    pub fn num_chroms(&self) -> usize {
        self.by_chrom.len()
    }

    pub fn num_junctions(&self) -> usize {
        self.by_chrom.values().map(ChromJunctions::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn junc(chrom: &str, donor: i64, acceptor: i64) -> JunctionRecord {
        JunctionRecord::new(chrom.to_string(), donor, acceptor, 1)
    }

    #[test]
    fn test_build_groups_and_sorts() {
        let index = JunctionIndex::build(vec![
            junc("chr1", 500, 900),
            junc("chr2", 10, 20),
            junc("chr1", 100, 400),
            junc("chr1", 100, 200),
        ]);

        assert_eq!(index.num_chroms(), 2);
        assert_eq!(index.num_junctions(), 4);

        let chr1 = index.chrom("chr1").unwrap().junctions();
        let coords: Vec<(i64, i64)> = chr1.iter().map(|j| (j.donor, j.acceptor)).collect();
        assert_eq!(coords, vec![(100, 200), (100, 400), (500, 900)]);
    }

    #[test]
    fn test_lower_bound_non_monotonic_acceptors() {
        // Sorted by donor: acceptors go 1000, 200, 300.
        let group = ChromJunctions::from_unsorted(vec![
            junc("chr1", 100, 1000),
            junc("chr1", 150, 200),
            junc("chr1", 250, 300),
        ]);
        // The long junction reaches 500 even though its neighbours do not.
        assert_eq!(group.lower_bound(500), 0);
        assert_eq!(group.lower_bound(100), 0);
        assert_eq!(group.lower_bound(1001), 3);
    }

    #[test]
    fn test_lower_bound_past_end() {
        let group = ChromJunctions::from_unsorted(vec![junc("chr1", 10, 20), junc("chr1", 30, 40)]);
        assert_eq!(group.lower_bound(41), 2);
        assert_eq!(group.lower_bound(40), 1);
        assert_eq!(group.lower_bound(21), 1);
    }

    #[test]
    fn test_upper_bound_no_match() {
        let group = ChromJunctions::from_unsorted(vec![junc("chr1", 10, 20), junc("chr1", 30, 40)]);
        assert_eq!(group.upper_bound(5), None);
        assert_eq!(group.upper_bound(10), Some(0));
        assert_eq!(group.upper_bound(29), Some(0));
        assert_eq!(group.upper_bound(1000), Some(1));
    }

    #[test]
    fn test_range_empty_when_window_before_all() {
        let group = ChromJunctions::from_unsorted(vec![junc("chr1", 100, 200)]);
        assert!(group.range(0, 50).is_empty());
        assert!(group.range(300, 400).is_empty());
        assert_eq!(group.range(150, 160).len(), 1);
    }

    #[test]
    fn test_range_between_junctions() {
        let group = ChromJunctions::from_unsorted(vec![junc("chr1", 10, 20), junc("chr1", 100, 200)]);
        // Window falls in the gap: lower bound 1, upper bound 0.
        assert!(group.range(30, 90).is_empty());
    }

    #[test]
    fn test_query_range_unknown_chrom() {
        let index = JunctionIndex::build(vec![junc("chr1", 10, 20)]);
        let err = index.query_range("chrY", 0, 100).unwrap_err();
        assert_eq!(err, ChromosomeNotFound("chrY".to_string()));
        assert_eq!(err.to_string(), "chromosome: chrY not in junctions provided");
    }

    #[test]
    fn test_empty_group() {
        let group = ChromJunctions::default();
        assert!(group.is_empty());
        assert_eq!(group.lower_bound(0), 0);
        assert_eq!(group.upper_bound(0), None);
        assert!(group.range(0, 10).is_empty());
    }
}
