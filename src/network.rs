//! The two-layer sigmoid network and the traits it is used through.
//!
//! Shapes:
//! - `W_in_hidden` is `(input_width, hidden_width)`
//! - `W_hidden_out` is `(hidden_width, output_width)`
//! - inference input is `(batch, input_width)`, output is `(batch, output_width)`
//!
//! There are no bias terms. Datasets that need one carry a constant input column.

use rand::RngCore;

use crate::activation::sigmoid_matrix;
use crate::{Error, Matrix, NetworkConfig, Result, TrainReport, TrainingDataset};

/// Anything that maps a batch of normalized input rows to output rows.
///
/// `infer` must not mutate the network.
pub trait Network {
    fn input_width(&self) -> usize;
    fn output_width(&self) -> usize;
    fn infer(&self, input: &Matrix) -> Result<Matrix>;
}

/// A [`Network`] that learns its weights from a [`TrainingDataset`].
pub trait Trainable: Network {
    /// Attaches a dataset. The normalized matrices are copied into the network.
    fn set_training_data(&mut self, data: &TrainingDataset) -> Result<()>;

    /// Reinitializes the weights from `rng` and runs the full training schedule.
    fn train_with_rng(&mut self, rng: &mut dyn RngCore) -> Result<TrainReport>;
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Weights {
    pub(crate) input_hidden: Matrix,
    pub(crate) hidden_output: Matrix,
}

/// Normalized `(X, Y)` as attached by `set_training_data`.
#[derive(Debug, Clone)]
pub(crate) struct TrainingMatrices {
    pub(crate) input: Matrix,
    pub(crate) output: Matrix,
}

/// Fully connected `input -> hidden -> output` network, sigmoid on both layers.
///
/// Weights do not exist until the first `train*` call (or
/// [`NeuralNetwork::from_weights`]); until then inference fails with
/// `MissingTrainingData`.
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    pub(crate) config: NetworkConfig,
    pub(crate) weights: Option<Weights>,
    pub(crate) training: Option<TrainingMatrices>,
}

impl NeuralNetwork {
    /// An untrained network with fixed hyperparameters.
    pub fn new(config: NetworkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            weights: None,
            training: None,
        })
    }

    /// A trained network built from explicit weight matrices.
    ///
    /// Requires `input_hidden.cols == config.hidden_width == hidden_output.rows`
    /// and non-zero outer widths.
    pub fn from_weights(
        config: NetworkConfig,
        input_hidden: Matrix,
        hidden_output: Matrix,
    ) -> Result<Self> {
        config.validate()?;
        if input_hidden.rows() == 0 || hidden_output.cols() == 0 {
            return Err(Error::ShapeMismatch(format!(
                "weights must have input and output width > 0, got ({}, {}) and ({}, {})",
                input_hidden.rows(),
                input_hidden.cols(),
                hidden_output.rows(),
                hidden_output.cols()
            )));
        }
        if input_hidden.cols() != config.hidden_width
            || hidden_output.rows() != config.hidden_width
        {
            return Err(Error::ShapeMismatch(format!(
                "weights ({}, {}) and ({}, {}) do not meet at hidden_width {}",
                input_hidden.rows(),
                input_hidden.cols(),
                hidden_output.rows(),
                hidden_output.cols(),
                config.hidden_width
            )));
        }
        if input_hidden
            .as_slice()
            .iter()
            .chain(hidden_output.as_slice())
            .any(|v| !v.is_finite())
        {
            return Err(Error::InvalidData(
                "weights must contain only finite values".to_owned(),
            ));
        }
        Ok(Self {
            config,
            weights: Some(Weights {
                input_hidden,
                hidden_output,
            }),
            training: None,
        })
    }

    #[inline]
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// True once weights exist.
    #[inline]
    pub fn is_trained(&self) -> bool {
        self.weights.is_some()
    }

    #[inline]
    pub fn has_training_data(&self) -> bool {
        self.training.is_some()
    }

    /// `W_in_hidden`, if weights exist.
    pub fn input_hidden(&self) -> Option<&Matrix> {
        self.weights.as_ref().map(|w| &w.input_hidden)
    }

    /// `W_hidden_out`, if weights exist.
    pub fn hidden_output(&self) -> Option<&Matrix> {
        self.weights.as_ref().map(|w| &w.hidden_output)
    }

    /// Attaches a dataset's normalized matrices for the next `train*` call.
    ///
    /// If the network already has weights, the dataset widths must match them.
    pub fn set_training_data(&mut self, data: &TrainingDataset) -> Result<()> {
        if let Some(w) = &self.weights {
            if w.input_hidden.rows() != data.input_width()
                || w.hidden_output.cols() != data.output_width()
            {
                return Err(Error::InvalidConfig(format!(
                    "dataset widths ({}, {}) differ from network widths ({}, {})",
                    data.input_width(),
                    data.output_width(),
                    w.input_hidden.rows(),
                    w.hidden_output.cols()
                )));
            }
        }
        data.log_summary();
        self.training = Some(TrainingMatrices {
            input: data.normalized_input(),
            output: data.normalized_output(),
        });
        Ok(())
    }

    /// Forward pass on normalized rows. Pure: weights are only read.
    pub fn infer(&self, input: &Matrix) -> Result<Matrix> {
        let w = self.weights.as_ref().ok_or_else(|| {
            Error::MissingTrainingData("network has no weights; train it first".to_owned())
        })?;
        if input.cols() != w.input_hidden.rows() {
            return Err(Error::ShapeMismatch(format!(
                "input has {} cols, network input width is {}",
                input.cols(),
                w.input_hidden.rows()
            )));
        }
        let (_, out) = w.forward(input)?;
        Ok(out)
    }
}

impl Weights {
    /// Returns `(hidden, out)` activations for a batch.
    pub(crate) fn forward(&self, input: &Matrix) -> Result<(Matrix, Matrix)> {
        let hidden = sigmoid_matrix(&input.dot(&self.input_hidden)?);
        let out = sigmoid_matrix(&hidden.dot(&self.hidden_output)?);
        Ok((hidden, out))
    }
}

impl Network for NeuralNetwork {
    /// Width of `W_in_hidden`, or of the attached dataset before training. 0 if neither exists.
    fn input_width(&self) -> usize {
        match (&self.weights, &self.training) {
            (Some(w), _) => w.input_hidden.rows(),
            (None, Some(t)) => t.input.cols(),
            (None, None) => 0,
        }
    }

    fn output_width(&self) -> usize {
        match (&self.weights, &self.training) {
            (Some(w), _) => w.hidden_output.cols(),
            (None, Some(t)) => t.output.cols(),
            (None, None) => 0,
        }
    }

    fn infer(&self, input: &Matrix) -> Result<Matrix> {
        NeuralNetwork::infer(self, input)
    }
}

impl Trainable for NeuralNetwork {
    fn set_training_data(&mut self, data: &TrainingDataset) -> Result<()> {
        NeuralNetwork::set_training_data(self, data)
    }

    fn train_with_rng(&mut self, rng: &mut dyn RngCore) -> Result<TrainReport> {
        NeuralNetwork::train_with_rng(self, rng)
    }
}
