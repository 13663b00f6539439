//! Full-batch backpropagation for [`NeuralNetwork`].
//!
//! Every cycle runs the whole attached dataset through the network and applies
//! one gradient step to both weight matrices. The schedule is the fixed
//! `training_cycles` count; there is no convergence check.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::activation::sigmoid_grad_matrix;
use crate::network::Weights;
use crate::{Error, Matrix, NeuralNetwork, Result};

/// Summary of one training run. Informational only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainReport {
    /// Cycles executed; always `config.training_cycles`.
    pub cycles: usize,
    /// Mean squared error of the first cycle's forward pass.
    pub initial_loss: f64,
    /// Mean squared error of the last cycle's forward pass.
    pub final_loss: f64,
}

impl NeuralNetwork {
    /// Train with weights drawn from the thread RNG.
    pub fn train(&mut self) -> Result<TrainReport> {
        let mut rng = rand::thread_rng();
        self.train_with_rng(&mut rng)
    }

    /// Deterministic training: the same seed and dataset give the same weights.
    pub fn train_with_seed(&mut self, seed: u64) -> Result<TrainReport> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.train_with_rng(&mut rng)
    }

    /// Reinitializes both weight matrices uniformly in the configured bounds,
    /// then runs `training_cycles` full-batch updates.
    pub fn train_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TrainReport> {
        let data = self.training.as_ref().ok_or_else(|| {
            Error::MissingTrainingData("no training data attached".to_owned())
        })?;
        if data.input.rows() == 0 {
            return Err(Error::MissingTrainingData(
                "attached training data has no rows".to_owned(),
            ));
        }

        let cfg = self.config;
        let x = &data.input;
        let y = &data.output;
        let mut w = Weights {
            input_hidden: Matrix::random_uniform(
                x.cols(),
                cfg.hidden_width,
                cfg.min_random_weight,
                cfg.max_random_weight,
                &mut *rng,
            )?,
            hidden_output: Matrix::random_uniform(
                cfg.hidden_width,
                y.cols(),
                cfg.min_random_weight,
                cfg.max_random_weight,
                &mut *rng,
            )?,
        };

        info!(
            rows = x.rows(),
            input_width = x.cols(),
            hidden_width = cfg.hidden_width,
            output_width = y.cols(),
            cycles = cfg.training_cycles,
            learning_rate = cfg.learning_rate,
            "training started"
        );

        // Constant across cycles.
        let x_t = x.transpose();
        let log_every = (cfg.training_cycles / 10).max(1);
        let mut initial_loss = 0.0;
        let mut final_loss = 0.0;

        for cycle in 0..cfg.training_cycles {
            let (hidden, out) = w.forward(x)?;

            let err_out = y.subtract(&out)?;
            let loss = err_out.mean_square();
            if cycle == 0 {
                initial_loss = loss;
            }
            final_loss = loss;

            let delta_out = err_out.hadamard(&sigmoid_grad_matrix(&out))?;
            // Uses W_hidden_out from before this cycle's update.
            let delta_hidden = delta_out
                .dot(&w.hidden_output.transpose())?
                .hadamard(&sigmoid_grad_matrix(&hidden))?;

            let step_out = hidden.transpose().dot(&delta_out)?.scale(cfg.learning_rate);
            let step_in = x_t.dot(&delta_hidden)?.scale(cfg.learning_rate);
            w.hidden_output = w.hidden_output.add(&step_out)?;
            w.input_hidden = w.input_hidden.add(&step_in)?;

            if (cycle + 1) % log_every == 0 {
                debug!(cycle = cycle + 1, mse = loss, "training progress");
            }
        }

        info!(initial_loss, final_loss, "training finished");
        self.weights = Some(w);
        Ok(TrainReport {
            cycles: cfg.training_cycles,
            initial_loss,
            final_loss,
        })
    }
}

/// Mean squared error of `net` against an already normalized `(input, target)` pair.
pub fn mean_squared_error(net: &NeuralNetwork, input: &Matrix, target: &Matrix) -> Result<f64> {
    let out = net.infer(input)?;
    Ok(target.subtract(&out)?.mean_square())
}
