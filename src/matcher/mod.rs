//! Matching logic for junctions to exon skipping hypotheses.

pub mod hypothesis;
pub mod index;
pub mod skip;

pub use hypothesis::{flanking_exon_ids, hypothesis_count, possible_skips};
pub use index::{ChromJunctions, ChromosomeNotFound, JunctionIndex};
pub use skip::{find_internal_junctions, find_supporting_junction, match_skip, scan_gene, skip_events};
