//! Learns a sine wave from sliding windows, then continues it autoregressively.
//!
//! Run with `cargo run --release --example sine_generator`.

use rust_ffn::{sequence, FeedbackMode, Generator, NetworkConfig, NeuralNetwork, ValueRange};

const WINDOW: usize = 16;

fn main() -> rust_ffn::Result<()> {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let wave: Vec<f64> = (0..400).map(|i| 0.9 * (i as f64 * 0.2).sin()).collect();
    let range = ValueRange::signed_unit();

    for (mode, outputs) in [(FeedbackMode::SingleStep, 1), (FeedbackMode::Block, WINDOW)] {
        let data = sequence::predictive_dataset(&wave, 0..300, WINDOW, outputs, range)?;
        let mut net = NeuralNetwork::new(NetworkConfig {
            hidden_width: 24,
            learning_rate: 0.05,
            training_cycles: 3_000,
            ..NetworkConfig::audio_predictor()
        })?;
        net.set_training_data(&data)?;
        net.train_with_seed(1)?;

        // Continue from the first unseen window and compare with the real signal.
        let generator = Generator::new(&net, range)?;
        let generated = generator.denormalize(&generator.generate_from(&wave, 300, 64, mode)?);
        let truth = &wave[300 + WINDOW..];
        let mse: f64 = generated
            .iter()
            .zip(truth)
            .map(|(g, t)| (g - t) * (g - t))
            .sum::<f64>()
            / generated.len() as f64;
        println!("{mode:?}: {} samples, mse vs. signal {mse:.5}", generated.len());
    }
    Ok(())
}
