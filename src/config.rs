//! Configuration and defaults for exskip.
//!
//! This module contains the run settings that are not tied to a single
//! input file: how GPE records are laid out and how genes are scheduled.

use anyhow::{bail, Result};

/// Default number of gene models per work chunk.
pub const DEFAULT_BATCH_SIZE: usize = 5000;

/// Configuration for an exon skipping scan.
#[derive(Debug, Clone)]
pub struct Config {
    /// GPE records carry a leading UCSC `bin` column.
    pub has_bin: bool,
    /// Worker threads (1 = sequential).
    pub threads: usize,
    /// Gene models read per chunk.
    pub batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            has_bin: false,
            threads: 1,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker count, where 0 means one thread per logical CPU.
    pub fn set_threads(&mut self, threads: usize) {
        self.threads = if threads == 0 {
            num_cpus::get()
        } else {
            threads
        };
    }

    /// Whether genes should be scanned on a worker pool.
    pub fn is_parallel(&self) -> bool {
        self.threads > 1
    }

    /// Reject settings the scanner cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("Batch size must be greater than 0");
        }
        if self.threads == 0 {
            bail!("Thread count must be greater than 0");
        }
        Ok(())
    }
}
