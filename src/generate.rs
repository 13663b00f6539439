//! Autoregressive generation: a trained predictor fed its own output.
//!
//! The seed window is raw (in the generator's value range) and is normalized
//! once. Everything produced afterwards stays in the normalized domain; use
//! [`Generator::denormalize`] before handing samples to a sink.

use tracing::debug;

use crate::sequence::check_range;
use crate::{Error, Matrix, Network, Result, SampleSource, ValueRange};

/// How network output is fed back into the next input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackMode {
    /// One output sample per step; the window shifts left by one.
    #[default]
    SingleStep,
    /// One output window per step (`output_width == input_width`); the window
    /// is replaced wholesale.
    Block,
}

/// Drives repeated `infer` calls on a borrowed network.
pub struct Generator<'a, N: Network + ?Sized> {
    network: &'a N,
    range: ValueRange,
}

impl<'a, N: Network + ?Sized> Generator<'a, N> {
    /// `range` is the raw amplitude range the network was trained on.
    pub fn new(network: &'a N, range: ValueRange) -> Result<Self> {
        range.validate()?;
        Ok(Self { network, range })
    }

    #[inline]
    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Produces `output_length` samples, one per inference.
    ///
    /// Requires a single-output network and `seed.len() == input_width`.
    pub fn single_step(&self, seed: &[f64], output_length: usize) -> Result<Vec<f64>> {
        let w = self.check_seed(seed)?;
        if self.network.output_width() != 1 {
            return Err(Error::ShapeMismatch(format!(
                "single-step feedback needs output width 1, network has {}",
                self.network.output_width()
            )));
        }
        debug!(window = w, output_length, "single-step generation started");

        let mut buffer = self.normalized_seed(seed);
        let mut out = Vec::with_capacity(output_length);
        for _ in 0..output_length {
            let next = self.step(&Matrix::row_vector(&buffer), 1)?[(0, 0)];
            out.push(next);
            buffer.rotate_left(1);
            buffer[w - 1] = next;
        }

        debug!(generated = out.len(), "single-step generation finished");
        Ok(out)
    }

    /// Produces `output_length / W * W` samples, one window per inference.
    ///
    /// Requires `output_width == input_width == seed.len()`.
    pub fn block(&self, seed: &[f64], output_length: usize) -> Result<Vec<f64>> {
        let w = self.check_seed(seed)?;
        if self.network.output_width() != w {
            return Err(Error::ShapeMismatch(format!(
                "block feedback needs output width == input width ({w}), network has {}",
                self.network.output_width()
            )));
        }
        let steps = output_length / w;
        debug!(window = w, steps, "block generation started");

        let mut buffer = Matrix::row_vector(&self.normalized_seed(seed));
        let mut out = Vec::with_capacity(steps * w);
        for _ in 0..steps {
            buffer = self.step(&buffer, w)?;
            out.extend_from_slice(buffer.row(0));
        }

        debug!(generated = out.len(), "block generation finished");
        Ok(out)
    }

    pub fn generate(
        &self,
        seed: &[f64],
        output_length: usize,
        mode: FeedbackMode,
    ) -> Result<Vec<f64>> {
        match mode {
            FeedbackMode::SingleStep => self.single_step(seed, output_length),
            FeedbackMode::Block => self.block(seed, output_length),
        }
    }

    /// Seeds from `source[start..start + input_width]`, then generates.
    pub fn generate_from<S: SampleSource + ?Sized>(
        &self,
        source: &S,
        start: usize,
        output_length: usize,
        mode: FeedbackMode,
    ) -> Result<Vec<f64>> {
        let end = start
            .checked_add(self.network.input_width())
            .ok_or_else(|| Error::OutOfRange(format!("seed start {start} overflows")))?;
        check_range(&(start..end), source.len())?;
        let seed = source.read(start..end)?;
        self.generate(&seed, output_length, mode)
    }

    /// Maps generated samples back into the raw value range.
    pub fn denormalize(&self, samples: &[f64]) -> Vec<f64> {
        samples.iter().map(|&x| self.range.denormalize(x)).collect()
    }

    fn check_seed(&self, seed: &[f64]) -> Result<usize> {
        let w = self.network.input_width();
        if w == 0 || seed.len() != w {
            return Err(Error::ShapeMismatch(format!(
                "seed window has len {}, network input width is {w}",
                seed.len()
            )));
        }
        Ok(w)
    }

    fn step(&self, window: &Matrix, output_width: usize) -> Result<Matrix> {
        let out = self.network.infer(window)?;
        if out.shape() != (1, output_width) {
            return Err(Error::ShapeMismatch(format!(
                "network returned {:?}, expected (1, {output_width})",
                out.shape()
            )));
        }
        Ok(out)
    }

    fn normalized_seed(&self, seed: &[f64]) -> Vec<f64> {
        seed.iter().map(|&x| self.range.normalize(x)).collect()
    }
}
