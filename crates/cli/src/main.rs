//! Cache Simulator CLI.
//!
//! The `csim` binary replays a Valgrind "lackey" memory trace against a
//! simulated set-associative cache with LRU replacement and reports exact
//! hit, miss, and eviction counts. It handles argument parsing, geometry
//! resolution, the replay loop, and summary output; every simulation
//! decision lives in `csim-core`.
//!
//! # Usage
//!
//! ```text
//! csim -s 4 -E 1 -b 4 -t traces/yi.trace
//! csim -v -s 8 -E 2 -b 4 -t traces/yi.trace
//! csim --config geometry.json -t traces/yi.trace
//! ```

use clap::Parser;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;

use csim_core::common::SimError;
use csim_core::config::CacheGeometry;
use csim_core::sim::{Replayer, TraceReader};
use csim_core::stats::SimStats;

/// Path the final counts are persisted to for downstream tooling.
const RESULTS_PATH: &str = ".csim_results";

/// Command-line arguments for the cache simulator.
///
/// Geometry comes from the `-s`/`-E`/`-b` flags, from a JSON `--config`
/// file, or from both (flags override file values).
#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Set-associative cache simulator (LRU) for Valgrind memory traces",
    long_about = "Replay a Valgrind lackey trace against a simulated set-associative cache \
with LRU replacement and report exact hit, miss, and eviction counts.\n\n\
Examples:\n  \
csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  \
csim -v -s 8 -E 2 -b 4 -t traces/yi.trace\n  \
csim --config geometry.json -t traces/yi.trace"
)]
struct Args {
    /// Number of set-index bits (the cache has 2^s sets).
    #[arg(short = 's', value_name = "num")]
    set_bits: Option<u32>,

    /// Number of lines per set (the associativity).
    #[arg(short = 'E', value_name = "num")]
    lines_per_set: Option<usize>,

    /// Number of block-offset bits (each block holds 2^b bytes).
    #[arg(short = 'b', value_name = "num")]
    block_bits: Option<u32>,

    /// Memory-access trace file to replay.
    #[arg(short = 't', long = "trace", value_name = "file")]
    trace: PathBuf,

    /// Echo every replayed record with its outcome(s).
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// JSON file with the cache geometry; explicit flags override its values.
    #[arg(long = "config", value_name = "file")]
    config: Option<PathBuf>,
}

/// Main entry point for the cache simulator.
///
/// # Behavior
///
/// 1. **Configuration**: Parses arguments and resolves the cache geometry.
/// 2. **Construction**: Builds the replayer (validating the geometry and
///    allocating cache storage) before touching the trace.
/// 3. **Replay**: Streams the trace through the engine, echoing records in
///    verbose mode.
/// 4. **Reporting**: Prints the statistics report and the canonical summary
///    line, then persists the counts to `.csim_results`.
///
/// Any failure prints to stderr and exits nonzero before counts are
/// reported; there is no partial-success output.
fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let geometry = resolve_geometry(&args);
    let mut replayer = match Replayer::new(geometry) {
        Ok(replayer) => replayer,
        Err(err) => fail(&err.to_string()),
    };

    let file = match File::open(&args.trace) {
        Ok(file) => file,
        Err(err) => fail(&format!("{}: {}", args.trace.display(), err)),
    };
    let reader = BufReader::new(file);

    let replayed = if args.verbose {
        replay_verbose(&mut replayer, reader)
    } else {
        replayer.replay(reader).map(|_| ())
    };
    if let Err(err) = replayed {
        fail(&err.to_string());
    }

    let stats = replayer.into_stats();
    stats.print();
    println!("{}", stats.summary_line());

    if let Err(err) = write_results(Path::new(RESULTS_PATH), &stats) {
        fail(&format!("{RESULTS_PATH}: {err}"));
    }
}

/// Builds the geometry from the config file and/or flags.
///
/// Without `--config`, all three of `-s`, `-E`, and `-b` are required,
/// matching the classic simulator interface. With it, the file supplies the
/// baseline and any explicit flag overrides the corresponding field.
fn resolve_geometry(args: &Args) -> CacheGeometry {
    let mut geometry = match &args.config {
        Some(path) => match load_geometry(path) {
            Ok(geometry) => geometry,
            Err(message) => fail(&message),
        },
        None => {
            if args.set_bits.is_none() || args.lines_per_set.is_none() || args.block_bits.is_none()
            {
                fail("missing required arguments: -s, -E, and -b (or --config <file>)");
            }
            CacheGeometry::default()
        }
    };

    if let Some(set_bits) = args.set_bits {
        geometry.set_bits = set_bits;
    }
    if let Some(lines_per_set) = args.lines_per_set {
        geometry.lines_per_set = lines_per_set;
    }
    if let Some(block_bits) = args.block_bits {
        geometry.block_bits = block_bits;
    }
    geometry
}

/// Deserializes a geometry from a JSON config file.
fn load_geometry(path: &Path) -> Result<CacheGeometry, String> {
    let file = File::open(path).map_err(|err| format!("{}: {}", path.display(), err))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|err| format!("{}: {}", path.display(), err))
}

/// Replays while echoing each record and its outcome(s) to stdout.
///
/// Output format matches the trace notation plus the outcome words, e.g.
/// `L 10,1 miss` or `M 20,1 miss eviction hit`.
fn replay_verbose<R: BufRead>(replayer: &mut Replayer, source: R) -> Result<(), SimError> {
    for item in TraceReader::new(source) {
        let record = item?;
        let outcome = replayer.step(&record);
        print!("{} {},{}", record.kind.letter(), record.addr, record.size);
        for access in outcome.outcomes() {
            print!(" {access}");
        }
        println!();
    }
    Ok(())
}

/// Persists the final counts in the fixed `hits misses evictions` format.
fn write_results(path: &Path, stats: &SimStats) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(
        file,
        "{} {} {}",
        stats.hits(),
        stats.misses(),
        stats.evictions()
    )
}

/// Prints an error to stderr and exits nonzero.
fn fail(message: &str) -> ! {
    eprintln!("csim: {message}");
    process::exit(1);
}
