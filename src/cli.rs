//! CLI interface for med-dataset
//!
//! Every invocation behaves like one dashboard session: the dataset is
//! seeded fresh, the command runs against it, and nothing is kept afterwards.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::dataset::{DatasetStats, DatasetStore, SampleFilter, SharedDataset};
use crate::learning::{FeedbackEvent, Prediction, Verdict};
use crate::types::{SampleDraft, HISTORY, SYMPTOMS};

#[derive(Parser)]
#[command(name = "med-dataset")]
#[command(about = "Clinical sample dataset for the medication recommendation demo", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a config file (default: platform config directory)
    #[arg(long, global = true, env = "MED_DATASET_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for the generated filler samples (overrides the config file)
    #[arg(long, global = true)]
    rng_seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dataset statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List samples
    List {
        /// Provenance filter: all, learned, original
        #[arg(short, long, default_value = "all")]
        filter: String,
        /// Match patient id, diagnosis or medication
        #[arg(short, long)]
        search: Option<String>,
        /// Maximum samples to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Write the dataset as a CSV download file
    Export {
        /// Output directory (default: export_dir from config, else current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print dataset metadata as JSON
    Metadata,
    /// Record feedback on a recommendation
    Learn(LearnArgs),
    /// Show the effective configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(clap::Args)]
struct LearnArgs {
    /// Confirmed diagnosis (catalog value or a new one)
    #[arg(short, long)]
    diagnosis: String,
    /// Recommended medication
    #[arg(short, long)]
    medication: String,
    /// Recommendation confidence (0.0-1.0)
    #[arg(short, long, default_value = "0.85")]
    confidence: f64,
    /// Reject the recommendation instead of confirming it
    #[arg(long)]
    reject: bool,
    #[arg(long)]
    patient_id: Option<String>,
    #[arg(long)]
    age: Option<u32>,
    #[arg(long)]
    sex: Option<String>,
    #[arg(long)]
    weight: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    systolic_bp: Option<u32>,
    #[arg(long)]
    diastolic_bp: Option<u32>,
    #[arg(long)]
    glucose: Option<f64>,
    #[arg(long)]
    temperature: Option<f64>,
    #[arg(long)]
    heart_rate: Option<u32>,
    #[arg(long)]
    oxygen_saturation: Option<f64>,
    /// Symptom present (repeatable), e.g. --symptom fever
    #[arg(long = "symptom")]
    symptoms: Vec<String>,
    /// Medical history entry (repeatable), e.g. --history asthma
    #[arg(long = "history")]
    history: Vec<String>,
    /// Export the updated dataset afterwards
    #[arg(long)]
    export: bool,
}

impl LearnArgs {
    fn observation(&self) -> Result<SampleDraft> {
        let mut draft = SampleDraft {
            patient_id: self.patient_id.clone(),
            age: self.age,
            sex: self.sex.clone(),
            weight: self.weight,
            height: self.height,
            systolic_bp: self.systolic_bp,
            diastolic_bp: self.diastolic_bp,
            glucose: self.glucose,
            temperature: self.temperature,
            heart_rate: self.heart_rate,
            oxygen_saturation: self.oxygen_saturation,
            ..Default::default()
        };

        for symptom in &self.symptoms {
            if !SYMPTOMS.contains(&symptom.as_str()) {
                anyhow::bail!("Unknown symptom '{}'. Available: {}", symptom, SYMPTOMS.join(", "));
            }
            draft.set_flag(symptom, true)?;
        }
        for entry in &self.history {
            if !HISTORY.contains(&entry.as_str()) {
                anyhow::bail!("Unknown history entry '{}'. Available: {}", entry, HISTORY.join(", "));
            }
            draft.set_flag(entry, true)?;
        }

        Ok(draft)
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    init_tracing(&config.logging.level);

    let seed = cli.rng_seed.or(config.dataset.rng_seed);
    let store = seeded_store(seed);

    match cli.command {
        Commands::Stats { json } => {
            let stats = store.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(&stats);
            }
        }
        Commands::List { filter, search, limit } => {
            let filter: SampleFilter = filter.parse()?;
            let results = store.query(search.as_deref(), filter);
            if results.is_empty() {
                println!("No samples found.");
            } else {
                for sample in results.iter().take(limit) {
                    println!(
                        "  {:<14} {:>3} {} {:<24} {:<12} {:.2} [{}]",
                        sample.patient_id,
                        sample.age,
                        sample.sex,
                        sample.diagnosis,
                        sample.recommended_medication,
                        sample.confidence,
                        if sample.is_learned() { "learned" } else { "original" },
                    );
                }
                println!("Showing {} of {} samples", results.len().min(limit), store.len());
            }
        }
        Commands::Export { out } => {
            let dir = out.unwrap_or_else(|| config.dataset.export_dir());
            let path = store.write_csv(&dir)?;
            println!("Exported {} samples to {}", store.len(), path.display());
        }
        Commands::Metadata => {
            println!("{}", store.export_metadata()?);
        }
        Commands::Learn(args) => {
            let event = FeedbackEvent {
                observation: args.observation()?,
                diagnosis: args.diagnosis.clone(),
                prediction: Prediction {
                    medication: args.medication.clone(),
                    confidence: args.confidence,
                },
                verdict: if args.reject { Verdict::Negative } else { Verdict::Positive },
            };

            let dataset = SharedDataset::new(store);
            let outcome = dataset.record_feedback(event).await;

            match &outcome.sample {
                Some(sample) => {
                    println!("Learned sample {} ({} -> {})", sample.patient_id, sample.diagnosis, sample.recommended_medication);
                    if outcome.novel_diagnosis {
                        println!("New diagnosis added: {}", sample.diagnosis);
                    }
                    if outcome.novel_medication {
                        println!("New medication added: {}", sample.recommended_medication);
                    }
                }
                None => println!("Feedback recorded as negative; dataset unchanged."),
            }
            println!();
            print_stats(&outcome.stats);

            if args.export {
                let path = dataset
                    .write_csv(&config.dataset.export_dir())
                    .await
                    .context("Failed to export updated dataset")?;
                println!("\nExported to {}", path.display());
            }
        }
        Commands::Config { show } => {
            if show {
                println!("{}", config.to_toml()?);
            } else {
                println!("Config file: {}", crate::config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // A second init (tests, embedding) is not an error worth surfacing
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn seeded_store(seed: Option<u64>) -> DatasetStore {
    let mut store = DatasetStore::new();
    let loaded = match seed {
        Some(seed) => {
            info!("Seeding dataset with fixed seed {}", seed);
            store.load_initial_with(&mut StdRng::seed_from_u64(seed))
        }
        None => store.load_initial(),
    };
    if !loaded {
        warn!("Dataset could not be seeded; continuing with an empty dataset");
    }
    store
}

fn print_stats(stats: &DatasetStats) {
    println!("Dataset Statistics");
    println!("==================");
    println!("Total samples:    {}", stats.total_samples);
    println!("Original samples: {}", stats.original_samples);
    println!("Learned samples:  {}", stats.learned_samples);
    println!("Diagnoses:        {}", stats.diagnoses);
    println!("Medications:      {}", stats.medications);
    println!("Last updated:     {}", stats.last_updated.to_rfc3339());
}
