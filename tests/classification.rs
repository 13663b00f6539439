use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_ffn::{
    colours, CategoryGroup, CategoryLayout, Matrix, NetworkConfig, NeuralNetwork, Trainable,
    TrainingDataset, ValueRange,
};

fn separable() -> TrainingDataset {
    let layout =
        CategoryLayout::new(vec![CategoryGroup::new("corner", &["low", "high"]).unwrap()]).unwrap();
    let mut ds = TrainingDataset::classifier(3, ValueRange::unit(), layout).unwrap();
    // The third column is a constant bias input.
    for x in [[0.0, 0.0, 1.0], [0.1, 0.0, 1.0], [0.0, 0.1, 1.0]] {
        ds.add_training_data(&x, &["low"]).unwrap();
    }
    for x in [[1.0, 1.0, 1.0], [0.9, 1.0, 1.0], [1.0, 0.9, 1.0]] {
        ds.add_training_data(&x, &["high"]).unwrap();
    }
    ds
}

fn small_config(cycles: usize) -> NetworkConfig {
    NetworkConfig {
        hidden_width: 4,
        learning_rate: 1.0,
        training_cycles: cycles,
        min_random_weight: -0.5,
        max_random_weight: 0.5,
    }
}

#[test]
fn separable_corners_converge_to_one_hot() {
    let ds = separable();
    let mut net = NeuralNetwork::new(small_config(10_000)).unwrap();
    net.set_training_data(&ds).unwrap();
    let report = net.train_with_seed(42).unwrap();
    assert_eq!(report.cycles, 10_000);
    assert!(report.final_loss < report.initial_loss);

    let out = net.infer(&ds.normalized_input()).unwrap();
    for (i, row) in out.iter_rows().enumerate() {
        let (hit, miss) = if i < 3 { (0, 1) } else { (1, 0) };
        assert!(row[hit] > 0.8, "row {i}: {row:?}");
        assert!(row[miss] < 0.2, "row {i}: {row:?}");
    }

    // Unseen points near each corner land on the same side.
    let probe = Matrix::from_rows(&[vec![0.05, 0.05, 1.0], vec![0.95, 0.95, 1.0]]).unwrap();
    let out = net.infer(&probe).unwrap();
    assert!(out[(0, 0)] > out[(0, 1)]);
    assert!(out[(1, 1)] > out[(1, 0)]);
}

#[test]
fn training_through_the_trait_object() {
    let ds = separable();
    let mut net = NeuralNetwork::new(small_config(200)).unwrap();
    let trainable: &mut dyn Trainable = &mut net;
    trainable.set_training_data(&ds).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let report = trainable.train_with_rng(&mut rng).unwrap();
    assert_eq!(report.cycles, 200);
    assert_eq!(trainable.input_width(), 3);
    assert_eq!(trainable.output_width(), 2);
    assert!(net.is_trained());
}

#[test]
fn colour_certainties_are_rounded_group_shares() {
    let ds = colours::dataset().unwrap();
    let config = NetworkConfig {
        training_cycles: 2_000,
        ..NetworkConfig::colour_classifier()
    };
    let mut net = NeuralNetwork::new(config).unwrap();
    net.set_training_data(&ds).unwrap();
    let report = net.train_with_seed(7).unwrap();
    assert!(report.final_loss < report.initial_loss);

    let raw = colours::inputs(&colours::PROBES).unwrap();
    let out = net.infer(&ds.normalize_input(&raw).unwrap()).unwrap();
    assert_eq!(out.shape(), (colours::PROBES.len(), 15));

    let layout = ds.layout().unwrap();
    for row in out.iter_rows() {
        assert!(row.iter().all(|&v| v > 0.0 && v <= 1.0));
        let cert = ds.certainty_percentages(row).unwrap();
        for g in 0..layout.groups().len() {
            let range = layout.group_range(g).unwrap();
            let sum: f64 = row[range.clone()].iter().sum();
            for c in range.clone() {
                let exact = row[c] / sum * 100.0;
                assert!((f64::from(cert[c]) - exact).abs() <= 0.5);
            }
            // Each column rounds by at most half a point.
            let total = f64::from(cert[range.clone()].iter().sum::<u32>());
            assert!((total - 100.0).abs() <= range.len() as f64 / 2.0);

            // The top-ranked column also has the largest certainty.
            let best = layout.ranked(row, g).unwrap()[0];
            assert!(range.clone().all(|c| cert[best] >= cert[c]));
        }
    }
}
