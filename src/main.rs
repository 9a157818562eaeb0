//! Kohonen CLI - Self-Organising Map trainer.
//!
//! Command-line interface for training a SOM on a generated or loaded
//! dataset and rendering the learned weight grid.

use clap::{Args, Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use kohonen::{data, render, Config, Result, Som};
use log::{error, warn};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "kohonen")]
#[command(version)]
#[command(about = "Self-Organising Map trainer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a map and render the learned weight grid
    Train(TrainArgs),
}

#[derive(Args)]
struct TrainArgs {
    /// Configuration file (JSON); explicit flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset file (JSON array of equal-length numeric rows)
    #[arg(short, long, conflicts_with = "samples")]
    input: Option<PathBuf>,

    /// Generate this many uniform random samples instead of loading a file
    #[arg(short, long)]
    samples: Option<usize>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Dimensionality of the input vectors
    #[arg(long)]
    input_dim: Option<usize>,

    /// Initial learning rate
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Number of training iterations
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Mini-batch size per iteration
    #[arg(short, long, conflicts_with = "full_batch")]
    batch_size: Option<usize>,

    /// Train on the full dataset every iteration
    #[arg(long)]
    full_batch: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Skip min-max normalisation of loaded datasets
    #[arg(long)]
    no_normalise: bool,

    /// Output image path (default: <output_dir>/som.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixel block size per lattice cell in the rendered image
    #[arg(long)]
    cell_size: Option<u32>,

    /// Write the BMU coordinates of the training data to this JSON file
    #[arg(long)]
    coords_out: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Train(args) => train(args),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Resolves explicit flags over config file values, once, at the boundary.
///
/// The library only ever sees the resolved configuration.
fn resolve_config(args: &TrainArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    if let Some(width) = args.width {
        config.som.width = width;
    }
    if let Some(height) = args.height {
        config.som.height = height;
    }
    if let Some(input_dim) = args.input_dim {
        config.som.input_dim = input_dim;
    }
    if let Some(learning_rate) = args.learning_rate {
        config.som.learning_rate = learning_rate;
    }
    if let Some(iterations) = args.iterations {
        config.som.n_iterations = iterations;
    }
    if let Some(batch_size) = args.batch_size {
        config.som.batch_size = Some(batch_size);
    }
    if args.full_batch {
        config.som.batch_size = None;
    }
    if let Some(seed) = args.seed {
        config.som.random_state = Some(seed);
    }
    if args.no_normalise {
        config.data.normalise = false;
    }
    if let Some(cell_size) = args.cell_size {
        config.render.cell_size = cell_size;
    }

    config.som.validate()?;
    Ok(config)
}

fn train(args: TrainArgs) -> Result<()> {
    let started = Instant::now();
    let config = resolve_config(&args)?;

    let spinner_style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap();
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let dataset = match &args.input {
        Some(path) => {
            pb.set_message(format!("Loading dataset from {}...", path.display()));
            let mut loaded = data::load_json(path)?;
            if config.data.normalise {
                data::min_max_normalise(&mut loaded);
            }
            loaded
        }
        None => {
            let n_samples = args.samples.unwrap_or(100);
            pb.set_message(format!("Generating {n_samples} random samples..."));
            data::generate(n_samples, config.som.input_dim, config.som.random_state)?
        }
    };
    pb.finish_and_clear();
    println!(
        "✓ Dataset: {} samples x {} features",
        dataset.nrows(),
        dataset.ncols()
    );

    let mut som = Som::from_config(&config.som)?;
    som.fit(
        dataset.view(),
        config.som.n_iterations,
        config.som.batch_size,
    )?;
    println!(
        "✓ Trained {}x{} map for {} iterations in {}",
        som.width(),
        som.height(),
        config.som.n_iterations,
        HumanDuration(started.elapsed())
    );

    let renderable = matches!(config.som.input_dim, 1 | 3 | 4);
    if args.output.is_none() && !renderable {
        warn!(
            "Skipping rendering: input dimension {} has no pixel format",
            config.som.input_dim
        );
    } else {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.render.output_dir).join("som.png"));
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        render::save(som.weights(), &output, config.render.cell_size)?;
        println!("✓ Weight grid written to {}", output.display());
    }

    if let Some(coords_path) = &args.coords_out {
        let coordinates = som.transform(dataset.view())?;
        let rows: Vec<[f64; 2]> = coordinates
            .rows()
            .into_iter()
            .map(|row| [row[0], row[1]])
            .collect();
        let file = fs::File::create(coords_path)?;
        serde_json::to_writer_pretty(file, &rows)?;
        println!(
            "✓ Coordinates for {} samples written to {}",
            rows.len(),
            coords_path.display()
        );
    }

    Ok(())
}
