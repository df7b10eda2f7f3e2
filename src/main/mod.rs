use clap::Parser;
use log::{info, warn, Level};
use simple_logger::init_with_level;
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use peakfasta::commands::extract_fasta;
use peakfasta::prelude::PeakFastaError;

#[derive(Parser, Debug)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
pub struct Args {
    /// Path to the reference genome text file (optionally gzip-compressed)
    #[arg(short = 'g', long, default_value = "data/genome.txt")]
    pub genome: PathBuf,

    /// Path to the tab-separated peak table (optionally gzip-compressed)
    #[arg(short = 'p', long, default_value = "data/peaks.tsv")]
    pub peaks: PathBuf,

    /// Output directory for the per-label FASTA files
    #[arg(short = 'o', long, default_value = "results/fasta")]
    pub outdir: PathBuf,

    /// Restrict output to a single transcription-factor label (exact match)
    #[arg(short = 't', long)]
    pub tf: Option<String>,

    /// Logging verbosity level
    #[arg(short = 'L', long, default_value = "info")]
    pub level: Level,
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "genome={}, peaks={}, outdir={}, tf={}, level={}",
            self.genome.display(),
            self.peaks.display(),
            self.outdir.display(),
            self.tf.as_deref().unwrap_or("-"),
            self.level,
        )
    }
}

fn run(args: &Args) -> Result<(), PeakFastaError> {
    let output = extract_fasta(&args.genome, &args.peaks, &args.outdir, args.tf.as_deref())?;
    for issue in output.report().issues() {
        warn!("{}", issue);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    init_with_level(args.level).unwrap_or_else(|e| panic!("{}", e));
    info!("starting peakfasta with args: {}", args);

    let start_time = Instant::now();
    match run(&args) {
        Ok(()) => info!(
            "run completed in {:.2} seconds",
            start_time.elapsed().as_secs_f64()
        ),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
