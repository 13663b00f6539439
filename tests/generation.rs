use rust_ffn::{
    sequence, Error, FeedbackMode, Generator, Matrix, NetworkConfig, NeuralNetwork,
    SampleSource, SequenceSink, TextFileSink, TextSamples, ValueRange,
};

const WINDOW: usize = 8;

fn wave(n: usize) -> Vec<f64> {
    (0..n).map(|i| 0.8 * (i as f64 * 0.25).sin()).collect()
}

fn trained(outputs: usize) -> NeuralNetwork {
    let samples = wave(120);
    let data =
        sequence::predictive_dataset(&samples, 0..120, WINDOW, outputs, ValueRange::signed_unit())
            .unwrap();
    assert_eq!(data.len(), 120 - WINDOW - outputs);

    let mut net = NeuralNetwork::new(NetworkConfig {
        hidden_width: 12,
        learning_rate: 0.5,
        training_cycles: 300,
        ..NetworkConfig::audio_predictor()
    })
    .unwrap();
    net.set_training_data(&data).unwrap();
    net.train_with_seed(3).unwrap();
    net
}

#[test]
fn single_step_produces_exactly_the_requested_length() {
    let net = trained(1);
    let generator = Generator::new(&net, ValueRange::signed_unit()).unwrap();
    let samples = wave(120);
    for len in [0, 1, 17, 50] {
        let out = generator
            .generate_from(&samples, 10, len, FeedbackMode::SingleStep)
            .unwrap();
        assert_eq!(out.len(), len);
        assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}

#[test]
fn block_truncates_to_whole_windows() {
    let net = trained(WINDOW);
    let generator = Generator::new(&net, ValueRange::signed_unit()).unwrap();
    let seed = wave(WINDOW);
    for len in [0, 7, 8, 30, 64] {
        let out = generator.generate(&seed, len, FeedbackMode::Block).unwrap();
        assert_eq!(out.len(), len / WINDOW * WINDOW);
    }
    let raw = generator.denormalize(&generator.block(&seed, 16).unwrap());
    assert!(raw.iter().all(|v| (-1.0..=1.0).contains(v)));
}

#[test]
fn generation_is_deterministic_for_a_trained_network() {
    let net = trained(1);
    let generator = Generator::new(&net, ValueRange::signed_unit()).unwrap();
    let seed = wave(WINDOW);
    assert_eq!(
        generator.single_step(&seed, 20).unwrap(),
        generator.single_step(&seed, 20).unwrap()
    );
}

#[test]
fn infer_width_mismatch_leaves_weights_unchanged() {
    let net = trained(1);
    let before = (net.input_hidden().cloned(), net.hidden_output().cloned());
    let err = net.infer(&Matrix::zeros(2, WINDOW + 1).unwrap()).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch(_)));
    assert_eq!(
        (net.input_hidden().cloned(), net.hidden_output().cloned()),
        before
    );
}

#[test]
fn seed_past_the_end_is_out_of_range() {
    let net = trained(1);
    let generator = Generator::new(&net, ValueRange::signed_unit()).unwrap();
    let samples = wave(20);
    let err = generator
        .generate_from(&samples, 15, 4, FeedbackMode::SingleStep)
        .unwrap_err();
    assert!(matches!(err, Error::OutOfRange(_)));
}

#[test]
fn text_files_drive_a_full_generation_pass() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = TextFileSink::new(dir.path());
    sink.write("wave.txt", &wave(40)).unwrap();

    let source = TextSamples::load(dir.path().join("wave.txt")).unwrap();
    assert_eq!(source.len(), 40);

    let net = trained(1);
    let generator = Generator::new(&net, ValueRange::signed_unit()).unwrap();
    let normalized = generator
        .generate_from(&source, 0, 12, FeedbackMode::SingleStep)
        .unwrap();
    sink.write("generated.txt", &generator.denormalize(&normalized))
        .unwrap();

    let back = TextSamples::load(dir.path().join("generated.txt")).unwrap();
    assert_eq!(back.len(), 12);
}
