//! Trains the built-in colour set and prints the two likeliest labels per group.
//!
//! Run with `cargo run --release --example colour_classifier`.

use rust_ffn::{colours, NetworkConfig, NeuralNetwork};

fn main() -> rust_ffn::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let data = colours::dataset()?;
    let mut net = NeuralNetwork::new(NetworkConfig::colour_classifier())?;
    net.set_training_data(&data)?;
    let report = net.train_with_seed(0)?;
    println!(
        "trained {} cycles, mse {:.4} -> {:.4}",
        report.cycles, report.initial_loss, report.final_loss
    );

    let out = net.infer(&data.normalize_input(&colours::inputs(&colours::PROBES)?)?)?;
    let layout = colours::layout()?;
    for (rgb, row) in colours::PROBES.iter().zip(out.iter_rows()) {
        let cert = layout.certainty_percentages(row)?;
        println!("RGB {:?}", rgb);
        for (g, group) in layout.groups().iter().enumerate() {
            let ranked = layout.ranked(row, g)?;
            let (first, second) = (ranked[0], ranked[1]);
            println!(
                "  {:<10} {} {}%, {} {}%",
                group.name(),
                layout.output_name(first)?,
                cert[first],
                layout.output_name(second)?,
                cert[second]
            );
        }
    }
    Ok(())
}
