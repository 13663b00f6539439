//! Command-line front end.
//!
//! Usage:
//!   rust-ffn train --samples wave.txt --start 53000 --end 54000 --model net.json
//!   rust-ffn generate --model net.json --samples wave.txt --start 5000 --length 100000 --out gen.txt
//!   rust-ffn colours

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_ffn::{
    colours, sequence, FeedbackMode, Generator, NetworkConfig, NeuralNetwork, SampleSource,
    SequenceSink, TextFileSink, TextSamples, ValueRange,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-layer sigmoid network: train, generate, classify colours")]
struct Cli {
    /// Log filter, e.g. `info`, `debug`, `rust_ffn=debug`
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a next-window predictor on a run of samples and save it
    Train(TrainArgs),
    /// Generate samples autoregressively from a saved predictor
    Generate(GenerateArgs),
    /// Train the built-in colour classifier and print its guesses for a few probes
    Colours(ColoursArgs),
}

#[derive(clap::Args, Debug)]
struct TrainArgs {
    /// Text file with one sample per line
    #[arg(long)]
    samples: PathBuf,

    /// First sample of the training run
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// One past the last sample (defaults to the end of the file)
    #[arg(long)]
    end: Option<usize>,

    /// Input window width
    #[arg(long, default_value_t = 200)]
    window: usize,

    /// Output window width (1 for next-sample prediction, equal to --window for block output)
    #[arg(long, default_value_t = 200)]
    outputs: usize,

    /// JSON file with a NetworkConfig (defaults to the audio preset)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    cycles: Option<usize>,

    #[arg(long)]
    learning_rate: Option<f64>,

    #[arg(long)]
    hidden: Option<usize>,

    /// Seed for the initial weights (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    range: RangeArgs,

    /// Where to write the trained network
    #[arg(long)]
    model: PathBuf,
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    #[arg(long)]
    model: PathBuf,

    /// Text file the seed window is read from
    #[arg(long)]
    samples: PathBuf,

    /// Offset of the seed window
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Number of samples to generate
    #[arg(long)]
    length: usize,

    #[arg(long, value_enum, default_value_t = Mode::Block)]
    mode: Mode,

    #[command(flatten)]
    range: RangeArgs,

    /// Output text file, one sample per line
    #[arg(long)]
    out: PathBuf,
}

#[derive(clap::Args, Debug)]
struct ColoursArgs {
    #[arg(long)]
    cycles: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(clap::Args, Debug)]
struct RangeArgs {
    /// Smallest raw sample value
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    min_value: f64,

    /// Largest raw sample value
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    max_value: f64,
}

impl RangeArgs {
    fn value_range(&self) -> Result<ValueRange> {
        Ok(ValueRange::new(self.min_value, self.max_value)?)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Single,
    Block,
}

impl From<Mode> for FeedbackMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Single => FeedbackMode::SingleStep,
            Mode::Block => FeedbackMode::Block,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level)
        .with_context(|| format!("invalid --log-level '{}'", cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Train(args) => train(args),
        Command::Generate(args) => generate(args),
        Command::Colours(args) => run_colours(args),
    }
}

fn load_config(path: Option<&Path>) -> Result<NetworkConfig> {
    let Some(path) = path else {
        return Ok(NetworkConfig::audio_predictor());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn train_network(net: &mut NeuralNetwork, seed: Option<u64>) -> Result<()> {
    let report = match seed {
        Some(seed) => net.train_with_seed(seed)?,
        None => net.train()?,
    };
    info!(
        cycles = report.cycles,
        initial_loss = report.initial_loss,
        final_loss = report.final_loss,
        "trained"
    );
    Ok(())
}

fn train(args: TrainArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(cycles) = args.cycles {
        config.training_cycles = cycles;
    }
    if let Some(rate) = args.learning_rate {
        config.learning_rate = rate;
    }
    if let Some(hidden) = args.hidden {
        config.hidden_width = hidden;
    }

    let samples = TextSamples::load(&args.samples)?;
    let end = args.end.unwrap_or(samples.len());
    let data = sequence::predictive_dataset(
        &samples,
        args.start..end,
        args.window,
        args.outputs,
        args.range.value_range()?,
    )?;
    if data.is_empty() {
        bail!(
            "samples {}..{end} are too few for window {} + outputs {}",
            args.start,
            args.window,
            args.outputs
        );
    }

    let mut net = NeuralNetwork::new(config)?;
    net.set_training_data(&data)?;
    train_network(&mut net, args.seed)?;

    net.save_json(&args.model)?;
    info!(path = %args.model.display(), "saved network");
    Ok(())
}

fn generate(args: GenerateArgs) -> Result<()> {
    let net = NeuralNetwork::load_json(&args.model)?;
    let samples = TextSamples::load(&args.samples)?;
    let generator = Generator::new(&net, args.range.value_range()?)?;

    let normalized = generator.generate_from(&samples, args.start, args.length, args.mode.into())?;
    let output = generator.denormalize(&normalized);

    let file_name = args
        .out
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("--out {} has no file name", args.out.display()))?;
    let dir = args
        .out
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut sink = TextFileSink::new(dir);
    sink.write(file_name, &output)?;
    info!(samples = output.len(), path = %args.out.display(), "wrote generated samples");
    Ok(())
}

fn run_colours(args: ColoursArgs) -> Result<()> {
    let mut config = NetworkConfig::colour_classifier();
    if let Some(cycles) = args.cycles {
        config.training_cycles = cycles;
    }

    let data = colours::dataset()?;
    let mut net = NeuralNetwork::new(config)?;
    net.set_training_data(&data)?;
    train_network(&mut net, args.seed)?;

    let raw = colours::inputs(&colours::PROBES)?;
    let out = net.infer(&data.normalize_input(&raw)?)?;
    let layout = colours::layout()?;

    for (rgb, row) in colours::PROBES.iter().zip(out.iter_rows()) {
        let cert = data.certainty_percentages(row)?;
        println!("RGB {}, {}, {}:", rgb[0], rgb[1], rgb[2]);
        for (g, group) in layout.groups().iter().enumerate() {
            let top: Vec<String> = layout
                .ranked(row, g)?
                .into_iter()
                .take(2)
                .map(|col| -> rust_ffn::Result<String> {
                    Ok(format!("{} {}%", layout.output_name(col)?, cert[col]))
                })
                .collect::<rust_ffn::Result<_>>()?;
            println!("  {}: {}", group.name(), top.join(", "));
        }
    }
    Ok(())
}
