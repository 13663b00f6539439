use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use rust_ffn::{sequence, Matrix, NetworkConfig, NeuralNetwork, ValueRange};

fn matrix_dot_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let a = Matrix::random_uniform(200, 200, -1.0, 1.0, &mut rng).unwrap();
    let b = Matrix::random_uniform(200, 220, -1.0, 1.0, &mut rng).unwrap();

    c.bench_function("matrix_dot_200x200_200x220", |bench| {
        bench.iter(|| black_box(black_box(&a).dot(black_box(&b)).unwrap()))
    });
}

fn sine_samples(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 * 0.05).sin()).collect()
}

fn training_cycle_bench(c: &mut Criterion) {
    let wave = sine_samples(600);
    let data = sequence::predictive_dataset(&wave, 0..600, 100, 100, ValueRange::signed_unit())
        .unwrap();
    let config = NetworkConfig {
        hidden_width: 110,
        training_cycles: 1,
        ..NetworkConfig::audio_predictor()
    };
    let mut net = NeuralNetwork::new(config).unwrap();
    net.set_training_data(&data).unwrap();

    c.bench_function("train_one_cycle_400x100_110_100", |bench| {
        bench.iter(|| black_box(net.train_with_seed(0).unwrap()))
    });
}

fn inference_bench(c: &mut Criterion) {
    let wave = sine_samples(600);
    let data = sequence::predictive_dataset(&wave, 0..600, 100, 100, ValueRange::signed_unit())
        .unwrap();
    let config = NetworkConfig {
        hidden_width: 110,
        training_cycles: 1,
        ..NetworkConfig::audio_predictor()
    };
    let mut net = NeuralNetwork::new(config).unwrap();
    net.set_training_data(&data).unwrap();
    net.train_with_seed(0).unwrap();
    let input = data.normalized_input();

    c.bench_function("infer_400x100_110_100", |bench| {
        bench.iter(|| black_box(net.infer(black_box(&input)).unwrap()))
    });
}

criterion_group!(
    benches,
    matrix_dot_bench,
    training_cycle_bench,
    inference_bench
);
criterion_main!(benches);
