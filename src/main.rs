use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use overheard::config::Config;
use overheard::corpus::load_documents;
use overheard::model::coherence::WindowCoherence;
use overheard::model::gibbs::GibbsTrainer;
use overheard::model::traits::TopicModeler;
use overheard::model::TrainingParams;
use overheard::output;
use overheard::pipeline;
use overheard::pipeline::search::{
    FailurePolicy, ModelSearchEngine, SearchProgress, SearchRange,
};

/// Overheard: latent topic discovery for short social-media posts.
///
/// Consumes tokenized posts (JSON lines, one token array per line) produced
/// by an upstream lemmatizer, and finds the latent topics people talk about.
#[derive(Parser)]
#[command(name = "overheard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a range of topic counts and rank them by coherence
    Search {
        /// Tokenized posts, one JSON token array per line
        #[arg(long)]
        input: PathBuf,

        /// First topic count to try
        #[arg(long, default_value = "5")]
        start: usize,

        /// Exclusive upper bound on topic counts
        #[arg(long, default_value = "35")]
        limit: usize,

        /// Increment between candidates
        #[arg(long, default_value = "5")]
        step: usize,

        /// Record failed candidates and keep going instead of aborting
        #[arg(long)]
        skip_failures: bool,
    },

    /// Train the final model and render its topics
    Topics {
        /// Tokenized posts, one JSON token array per line
        #[arg(long)]
        input: PathBuf,

        /// Number of topics for the final model
        #[arg(long, default_value = "30")]
        num_topics: usize,

        /// Terms to show per topic
        #[arg(long, default_value = "10")]
        num_words: usize,

        /// Write the trained model as JSON to this path
        #[arg(long)]
        save: Option<PathBuf>,

        /// Print the plain report instead of the colored display
        #[arg(long)]
        plain: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("overheard=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Search {
            input,
            start,
            limit,
            step,
            skip_failures,
        } => {
            let documents = load_documents(&input)?;
            info!(documents = documents.len(), "Loaded tokenized posts");

            let corpus = pipeline::prepare(&documents, &config.collocation, &config.vocabulary)?;

            let trainer = GibbsTrainer;
            let scorer = WindowCoherence::default();
            let policy = if skip_failures {
                FailurePolicy::Skip
            } else {
                FailurePolicy::Abort
            };
            let engine =
                ModelSearchEngine::new(&trainer, &scorer, config.seed).with_policy(policy);
            let range = SearchRange { start, limit, step };

            println!(
                "Searching topic counts {}..{} (step {})...",
                start, limit, step
            );

            let mut bar: Option<ProgressBar> = None;
            let result = engine.run(&corpus, range, &mut |event| match event {
                SearchProgress::Started { num_candidates } => {
                    let pb = ProgressBar::new(num_candidates as u64);
                    pb.set_style(
                        ProgressStyle::default_bar()
                            .template("  Search [{bar:30}] {pos}/{len} ({eta})")
                            .unwrap(),
                    );
                    bar = Some(pb);
                }
                SearchProgress::CandidateStarted { .. } => {}
                SearchProgress::CandidateScored {
                    num_topics,
                    coherence,
                } => {
                    if let Some(pb) = &bar {
                        pb.println(format!("  {num_topics} topics: coherence {coherence:.4}"));
                        pb.inc(1);
                    }
                }
                SearchProgress::CandidateFailed { num_topics } => {
                    if let Some(pb) = &bar {
                        pb.println(format!("  {num_topics} topics: failed"));
                        pb.inc(1);
                    }
                }
            })?;
            if let Some(pb) = bar.take() {
                pb.finish_and_clear();
            }

            output::terminal::display_search_result(&result);
            if let Some(best) = result.best() {
                println!(
                    "\nNext step: {}",
                    format!("overheard topics --input {} --num-topics {}", input.display(), best.num_topics)
                        .dimmed()
                );
            }
        }

        Commands::Topics {
            input,
            num_topics,
            num_words,
            save,
            plain,
        } => {
            let documents = load_documents(&input)?;
            info!(documents = documents.len(), "Loaded tokenized posts");

            let corpus = pipeline::prepare(&documents, &config.collocation, &config.vocabulary)?;

            println!("Training the final model ({num_topics} topics)...");
            let params = TrainingParams::final_phase(num_topics, config.seed);
            let model = GibbsTrainer.train(&corpus.encoded, &corpus.vocabulary, &params)?;

            if plain {
                print!(
                    "{}",
                    output::render_topics(&model, &corpus.vocabulary, num_topics, num_words)
                );
            } else {
                output::terminal::display_topics(&model, &corpus.vocabulary, num_topics, num_words);
            }

            if let Some(path) = save {
                let json = serde_json::to_string_pretty(&model)?;
                fs::write(&path, json)
                    .with_context(|| format!("cannot write model to {}", path.display()))?;
                println!("Model saved to {}", path.display());
            }
        }
    }

    Ok(())
}
