use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::Level;

use ccbf_core::{
    accuracy,
    codec,
    consts::DEFAULT_FILTER_PATH,
    misspelled, wordlist, FilterConfig, SpellReport,
};

#[derive(Parser)]
#[command(name = "ccbf", about = "Bloom filter spell checker")]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Args, Clone)]
struct SizingArgs {
    /// JSON file with `capacity` and/or `error_rate`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Expected number of words
    #[arg(long)]
    capacity: Option<f64>,
    /// Target false-positive rate, in (0, 1)
    #[arg(long)]
    error_rate: Option<f64>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Build a filter from a word list, one word per line
    Build {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = DEFAULT_FILTER_PATH)]
        output: PathBuf,
        #[command(flatten)]
        sizing: SizingArgs,
    },

    /// Print the words the filter has never seen
    Check {
        #[arg(long, default_value = DEFAULT_FILTER_PATH)]
        filter: PathBuf,
        words: Vec<String>,
    },

    /// Show filter parameters
    Info {
        #[arg(long, default_value = DEFAULT_FILTER_PATH)]
        filter: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Insert a random half of a word list and measure error rates
    Accuracy {
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        sizing: SizingArgs,
        /// Fixed RNG seed for repeatable runs
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn ensure_parent(p: &Path) -> Result<()> {
    if let Some(dir) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn resolve_config(s: &SizingArgs) -> Result<FilterConfig> {
    let base = match &s.config {
        Some(p) => FilterConfig::load(p)?,
        None => FilterConfig::default(),
    };
    let cfg = base.with_overrides(s.capacity, s.error_rate);
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match cli.cmd {
        Cmd::Build { input, output, sizing } => {
            let cfg = resolve_config(&sizing)?;
            let bf = wordlist::build_from_path(&input, &cfg)
                .with_context(|| format!("building filter from {}", input.display()))?;
            ensure_parent(&output)?;
            codec::save(&bf, &output)?;
            println!(
                "build: {} words -> {} (k={}, m={})",
                bf.inserted(),
                output.display(),
                bf.hash_rounds(),
                bf.bit_count()
            );
        }
        Cmd::Check { filter, words } => {
            if words.is_empty() {
                return Ok(());
            }
            let bf = codec::load(&filter)
                .with_context(|| format!("reading filter {}", filter.display()))?;
            let report = SpellReport { wrong: misspelled(&bf, &words) };
            println!("{report}");
        }
        Cmd::Info { filter, json } => {
            let bf = codec::load(&filter)
                .with_context(|| format!("reading filter {}", filter.display()))?;
            if json {
                let v = serde_json::json!({
                    "hash_rounds": bf.hash_rounds(),
                    "bit_count": bf.bit_count(),
                    "bitmap_bytes": bf.bitmap().len(),
                    "bits_set": bf.ones(),
                    "estimated_fpr": bf.estimated_fpr(),
                });
                println!("{}", serde_json::to_string_pretty(&v)?);
            } else {
                println!("{}", filter.display());
                println!("{bf}");
            }
        }
        Cmd::Accuracy { input, sizing, seed, json } => {
            let cfg = resolve_config(&sizing)?;
            let f = File::open(&input)
                .with_context(|| format!("opening word list {}", input.display()))?;
            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_os_rng(),
            };
            let r = accuracy::measure_reader(BufReader::new(f), &cfg, &mut rng)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&r)?);
            } else {
                println!(
                    "The false positive rate is {:.4} percent with {} false positives and {} total inserts",
                    r.false_positive_rate * 100.0,
                    r.false_positives,
                    r.inserted
                );
                println!("There are {} false negatives", r.false_negatives);
            }
        }
    }
    Ok(())
}
