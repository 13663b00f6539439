//! A small feed-forward network engine.
//!
//! `rust-ffn` trains one fixed architecture, `input -> hidden -> output` with a
//! sigmoid on both layers and no biases, by full-batch gradient descent. The same
//! engine serves two jobs:
//!
//! - Classification: RGB colours into colour, brightness and saturation groups
//!   ([`colours`], [`CategoryLayout`]).
//! - Prediction: sliding windows over a waveform ([`sequence`]), then
//!   autoregressive generation from the trained predictor ([`Generator`]).
//!
//! # Panics vs `Result`
//!
//! Everything that takes caller data validates shapes and configuration and
//! returns [`Result`]. The only panicking calls are plain accessors such as
//! [`Matrix::row`] with an out-of-bounds index.
//!
//! # Data layout and shapes
//!
//! - Scalars are `f64`.
//! - [`Matrix`] is dense and row-major; one row is one example.
//! - `W_in_hidden` is `(input_width, hidden_width)`, `W_hidden_out` is
//!   `(hidden_width, output_width)`.
//! - Networks see normalized values in `[0, 1]`. [`TrainingDataset`] and
//!   [`Generator`] do the mapping from and back to the raw range.
//!
//! # Features
//!
//! - `serde` (default): JSON snapshots, serializable configs.
//! - `cli` (default): the `rust-ffn` binary (`clap`, `anyhow`, `tracing-subscriber`).
//! - `matrixmultiply`: use `matrixmultiply::dgemm` for [`Matrix::dot`].

//! # Quick start
//!
//! ```rust
//! use rust_ffn::{Matrix, NetworkConfig, NeuralNetwork, TrainingDataset, ValueRange};
//!
//! # fn main() -> rust_ffn::Result<()> {
//! let mut data = TrainingDataset::regression(3, 1, ValueRange::unit(), ValueRange::unit())?;
//! // The constant third input acts as a bias.
//! data.add_row(&[0.0, 0.0, 1.0], &[0.0])?;
//! data.add_row(&[1.0, 1.0, 1.0], &[1.0])?;
//!
//! let config = NetworkConfig {
//!     hidden_width: 4,
//!     learning_rate: 1.0,
//!     training_cycles: 500,
//!     ..NetworkConfig::default()
//! };
//! let mut net = NeuralNetwork::new(config)?;
//! net.set_training_data(&data)?;
//! let report = net.train_with_seed(0)?;
//! assert!(report.final_loss < report.initial_loss);
//!
//! let out = net.infer(&Matrix::row_vector(&[1.0, 1.0, 1.0]))?;
//! assert_eq!(out.shape(), (1, 1));
//! Ok(())
//! # }
//! ```

//! # Generation
//!
//! ```rust
//! use rust_ffn::{FeedbackMode, Generator, NetworkConfig, NeuralNetwork, ValueRange};
//!
//! # fn main() -> rust_ffn::Result<()> {
//! let wave: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).sin()).collect();
//! let data = rust_ffn::sequence::predictive_dataset(&wave, 0..64, 8, 1, ValueRange::signed_unit())?;
//!
//! let mut net = NeuralNetwork::new(NetworkConfig {
//!     hidden_width: 8,
//!     learning_rate: 0.5,
//!     training_cycles: 50,
//!     ..NetworkConfig::default()
//! })?;
//! net.set_training_data(&data)?;
//! net.train_with_seed(1)?;
//!
//! let generator = Generator::new(&net, ValueRange::signed_unit())?;
//! let normalized = generator.generate_from(&wave, 0, 20, FeedbackMode::SingleStep)?;
//! let samples = generator.denormalize(&normalized);
//! assert_eq!(samples.len(), 20);
//! Ok(())
//! # }
//! ```

pub mod activation;
pub mod category;
pub mod colours;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generate;
pub(crate) mod matmul;
pub mod matrix;
pub mod network;
pub mod sequence;
pub mod snapshot;
pub mod text;
pub mod train;

pub use category::{CategoryGroup, CategoryLayout};
pub use config::{NetworkConfig, ValueRange};
pub use dataset::TrainingDataset;
pub use error::{Error, Result};
pub use generate::{FeedbackMode, Generator};
pub use matrix::Matrix;
pub use network::{Network, NeuralNetwork, Trainable};
pub use sequence::{SampleSource, SequenceSink};
pub use snapshot::{SerializedMatrix, SerializedNetwork, WeightStore};
#[cfg(feature = "serde")]
pub use snapshot::JsonFileStore;
pub use text::{TextFileSink, TextSamples};
pub use train::TrainReport;
