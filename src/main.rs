//! Career Ensemble - command-line entry point
//!
//! # Usage
//!
//! ```bash
//! career-ensemble verify
//! career-ensemble --models-dir ./models predict -i request.json
//! career-ensemble predict -i request.json --weights 0.7,0.3 --format json
//! ```

use career_ensemble::inference::{EngineSummary, SmokeCheck};
use career_ensemble::{
    EngineConfig, EnsemblePredictor, EnsembleWeights, InferenceEngine, PredictionRequest,
    PredictionResult,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "career-ensemble")]
#[command(version)]
#[command(about = "Career domain recommender (personality + reading comprehension)", long_about = None)]
struct Cli {
    /// Engine config file (JSON)
    #[arg(long, short, env = "CAREER_CONFIG", default_value = "career-ensemble.json")]
    config: String,

    /// Override the models directory from the config
    #[arg(long, env = "CAREER_MODELS_DIR")]
    models_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every model artifact and report its shape
    Verify,
    /// Recommend a domain for a request file
    Predict {
        /// Request body: {"personality_scores": {...}, "reading_responses": {...}}
        #[arg(long, short)]
        input: PathBuf,
        /// Track weights as "personality,reading"
        #[arg(long, value_parser = parse_weights)]
        weights: Option<EnsembleWeights>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_weights(s: &str) -> Result<EnsembleWeights, String> {
    let (p, r) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"personality,reading\", got {:?}", s))?;
    let parse = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("{}: {}", v, e));
    let weights = EnsembleWeights::new(parse(p)?, parse(r)?);
    weights.validate().map_err(|e| e.to_string())?;
    Ok(weights)
}

fn load_config(cli: &Cli) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = if std::path::Path::new(&cli.config).exists() {
        EngineConfig::load(&cli.config)?
    } else {
        tracing::warn!("Config {} not found, using defaults", cli.config);
        EngineConfig::default()
    };
    if let Some(dir) = &cli.models_dir {
        config.models_dir = dir.clone();
    }
    Ok(config)
}

fn print_summary(summary: &EngineSummary) {
    println!("Personality model: {} clusters x {} features", summary.personality.clusters, summary.personality.features);
    for (cluster, label) in &summary.personality.labels {
        println!("  cluster {}: {}", cluster, label);
    }
    println!("Reading model: {} clusters x {} features", summary.reading.clusters, summary.reading.features);
    for (cluster, label) in &summary.reading.labels {
        println!("  cluster {}: {}", cluster, label);
    }
    println!("Boost factor: {}", summary.boost_factor);
}

fn print_check(check: &SmokeCheck) {
    println!("\nNeutral input check:");
    for (name, track) in [("personality", &check.personality), ("reading", &check.reading)] {
        println!(
            "  {}: {} distances, {} probabilities, top domain {}",
            name,
            track.distances,
            track.probabilities,
            track.scores.best()
        );
    }
}

fn print_result(result: &PredictionResult) {
    println!("{}", "=".repeat(40));
    println!("FINAL RECOMMENDATION: {}", result.final_recommendation);
    println!("{}", "=".repeat(40));

    println!("\nDetailed Scores:");
    for (domain, score) in result.final_scores.iter() {
        println!("  {}: {:.4}", domain, score);
    }

    println!("\nModel Breakdown:");
    println!("  Personality Model Contribution:");
    for (domain, score) in result.personality_scores.iter() {
        println!("    {}: {:.4}", domain, score);
    }
    println!("  Reading Model Contribution:");
    for (domain, score) in result.reading_scores.iter() {
        println!("    {}: {:.4}", domain, score);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::info!("Career Ensemble v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let engine = InferenceEngine::load(&config)?;

    match cli.command {
        Commands::Verify => {
            let summary = engine.summary();
            let check = engine.smoke_check()?;
            match cli.format {
                OutputFormat::Text => {
                    print_summary(&summary);
                    print_check(&check);
                }
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "summary": summary,
                        "check": check,
                    }))?
                ),
            }
        }
        Commands::Predict { input, weights } => {
            let content = std::fs::read_to_string(&input)?;
            let request: PredictionRequest = serde_json::from_str(&content)?;

            let predictor = EnsemblePredictor::with_weights(engine, config.weights);
            let weights = weights.unwrap_or(predictor.weights());
            let result = predictor.predict_weighted(
                &request.personality_scores,
                &request.reading_responses,
                weights,
            )?;

            match cli.format {
                OutputFormat::Text => print_result(&result),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }
        }
    }

    Ok(())
}
