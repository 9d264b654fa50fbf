//! CLI entry point for exskip.
//!
//! Reads TopHat junctions and a GPE annotation, writes one row per exon
//! skipping event and one diagnostic line per gene without events.

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, info, Level};
use simple_logger::init_with_level;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use exskip::config::{Config, DEFAULT_BATCH_SIZE};
use exskip::matcher::{scan_gene, JunctionIndex};
use exskip::output::{write_header, write_outcome};
use exskip::parser::{parse_junctions, GpeReader};
use exskip::types::{GeneModel, GeneOutcome};

/// Exon skipping scanner.
///
/// Finds junctions that bridge non-adjacent exons of annotated transcripts.
#[derive(Parser, Debug)]
#[command(name = "exskip")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// junctions.bed generated by TopHat (BED12, .gz allowed)
    #[arg(short = 'j', long = "junc")]
    junc: PathBuf,

    /// Gene structure annotation in GPE format (.gz allowed)
    #[arg(short = 'g', long = "gpe")]
    gpe: PathBuf,

    /// The GPE file has a leading bin column
    #[arg(short = 'b', long = "bin")]
    bin: bool,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Number of worker threads (0 = auto-detect, 1 = sequential)
    #[arg(long = "threads", short = 't', default_value = "1")]
    threads: usize,

    /// Gene models per work chunk
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
}

/// Counts reported at the end of a run.
#[derive(Debug, Default)]
struct RunSummary {
    genes: usize,
    genes_with_events: usize,
    events: usize,
}

impl RunSummary {
    fn record(&mut self, rows: usize) {
        self.genes += 1;
        self.events += rows;
        if rows > 0 {
            self.genes_with_events += 1;
        }
    }
}

fn main() -> Result<()> {
    let start = Instant::now();
    init_with_level(Level::Info).context("Failed to initialise logger")?;

    let args = Args::parse();

    if !args.junc.exists() {
        bail!("Junction file not found: {}", args.junc.display());
    }
    if !args.gpe.exists() {
        bail!("GPE file not found: {}", args.gpe.display());
    }

    let mut config = Config::new();
    config.has_bin = args.bin;
    config.batch_size = args.batch_size;
    config.set_threads(args.threads);
    config.validate()?;

    info!("Loading junctions: {}", args.junc.display());
    let junctions = parse_junctions(&args.junc)?;
    let index = JunctionIndex::build(junctions);
    info!(
        "Indexed {} junctions on {} chromosomes",
        index.num_junctions(),
        index.num_chroms()
    );

    info!("Scanning gene models: {}", args.gpe.display());
    let gpe = GpeReader::new(&args.gpe, config.has_bin)?;

    let mut out: Box<dyn Write + Send> = match &args.output {
        Some(path) => {
            info!("Writing output to: {}", path.display());
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    };
    write_header(&mut out)?;

    let summary = if config.is_parallel() {
        run_parallel(gpe, out, Arc::new(index), &config)?
    } else {
        run_sequential(gpe, &mut out, &index, &config)?
    };

    info!(
        "{} exon skipping events in {} of {} gene models",
        summary.events, summary.genes_with_events, summary.genes
    );
    info!("Elapsed time: {:?}", start.elapsed());
    Ok(())
}

/// Scan genes one chunk at a time on the calling thread.
fn run_sequential<W: Write>(
    mut gpe: GpeReader,
    out: &mut W,
    index: &JunctionIndex,
    config: &Config,
) -> Result<RunSummary> {
    let mut diag = io::stderr().lock();
    let mut summary = RunSummary::default();

    while let Some(chunk) = gpe.read_chunk(config.batch_size)? {
        for gene in &chunk {
            let outcome = scan_gene(gene, index);
            summary.record(write_outcome(out, &mut diag, gene, &outcome)?);
        }
    }

    out.flush()?;
    Ok(summary)
}

/// A chunk of gene models in file order.
struct WorkItem {
    seq_id: u64,
    genes: Vec<GeneModel>,
}

/// Outcomes of one `WorkItem`, in the same order as its genes.
struct WorkResult {
    seq_id: u64,
    outcomes: Vec<(GeneModel, GeneOutcome)>,
}

/// Scan genes on a worker pool; the writer restores file order.
fn run_parallel(
    gpe: GpeReader,
    out: Box<dyn Write + Send>,
    index: Arc<JunctionIndex>,
    config: &Config,
) -> Result<RunSummary> {
    let num_threads = config.threads;
    info!("Using parallel mode with {} threads", num_threads);

    let (work_tx, work_rx): (Sender<WorkItem>, Receiver<WorkItem>) = bounded(num_threads * 4);
    let (result_tx, result_rx): (Sender<WorkResult>, Receiver<WorkResult>) =
        bounded(num_threads * 16);

    let writer_handle = thread::spawn(move || write_results_ordered(out, result_rx));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .context("Failed to create thread pool")?;

    let workers_handle = thread::spawn({
        let work_rx = work_rx.clone();
        let result_tx = result_tx.clone();
        let index = Arc::clone(&index);
        move || {
            pool.scope(|s| {
                for _ in 0..num_threads {
                    let work_rx = work_rx.clone();
                    let result_tx = result_tx.clone();
                    let index = Arc::clone(&index);
                    s.spawn(move |_| worker_loop(work_rx, result_tx, &index));
                }
            });
        }
    });

    // Workers own the only receivers, so a dead pool cannot block the producer.
    drop(work_rx);

    // Stop feeding on a parse error but still shut the pipeline down cleanly.
    let produced = feed_chunks(gpe, config.batch_size, &work_tx);
    drop(work_tx);
    workers_handle
        .join()
        .map_err(|_| anyhow::anyhow!("Worker thread panicked"))?;

    drop(result_tx);
    let summary = writer_handle
        .join()
        .map_err(|_| anyhow::anyhow!("Writer thread panicked"))??;

    produced?;
    Ok(summary)
}

/// Producer: read GPE chunks and hand them to the workers.
fn feed_chunks(mut gpe: GpeReader, batch_size: usize, work_tx: &Sender<WorkItem>) -> Result<()> {
    let mut seq_id = 0;
    while let Some(genes) = gpe.read_chunk(batch_size)? {
        debug!("Queued chunk {} with {} gene models", seq_id, genes.len());
        if work_tx.send(WorkItem { seq_id, genes }).is_err() {
            break;
        }
        seq_id += 1;
    }
    Ok(())
}

/// Worker loop: receives gene chunks and sends back their outcomes.
fn worker_loop(work_rx: Receiver<WorkItem>, result_tx: Sender<WorkResult>, index: &JunctionIndex) {
    while let Ok(item) = work_rx.recv() {
        let outcomes = item
            .genes
            .into_iter()
            .map(|gene| {
                let outcome = scan_gene(&gene, index);
                (gene, outcome)
            })
            .collect();

        let result = WorkResult {
            seq_id: item.seq_id,
            outcomes,
        };
        if result_tx.send(result).is_err() {
            break;
        }
    }
}

/// Write results in chunk order, buffering chunks that finish early.
fn write_results_ordered(
    mut out: Box<dyn Write + Send>,
    result_rx: Receiver<WorkResult>,
) -> Result<RunSummary> {
    let mut diag = io::stderr();
    let mut pending: BTreeMap<u64, WorkResult> = BTreeMap::new();
    let mut next_expected: u64 = 0;
    let mut summary = RunSummary::default();

    for result in result_rx {
        pending.insert(result.seq_id, result);

        while let Some(ready) = pending.remove(&next_expected) {
            for (gene, outcome) in &ready.outcomes {
                summary.record(write_outcome(&mut out, &mut diag, gene, outcome)?);
            }
            next_expected += 1;
        }
    }

    out.flush()?;
    Ok(summary)
}
