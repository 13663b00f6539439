//! Sample streams and the sliding-window dataset builder.
//!
//! The engine never touches files. It reads samples through [`SampleSource`]
//! and hands generated sequences to a [`SequenceSink`]; what sits behind those
//! traits (a WAV reader, a text file, a `Vec`) is the caller's business.

use std::collections::HashMap;
use std::ops::Range;

use tracing::debug;

use crate::matrix::element_count;
use crate::{Error, Matrix, Result, TrainingDataset, ValueRange};

/// A flat, index-addressable run of amplitudes.
pub trait SampleSource {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies out `range`. Fails with `OutOfRange` if it reaches past the end.
    fn read(&self, range: Range<usize>) -> Result<Vec<f64>>;
}

/// Persists a generated sequence under an identifier (file name or tag).
pub trait SequenceSink {
    fn write(&mut self, id: &str, samples: &[f64]) -> Result<()>;
}

impl SampleSource for [f64] {
    fn len(&self) -> usize {
        <[f64]>::len(self)
    }

    fn read(&self, range: Range<usize>) -> Result<Vec<f64>> {
        check_range(&range, <[f64]>::len(self))?;
        Ok(self[range].to_vec())
    }
}

impl SampleSource for Vec<f64> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn read(&self, range: Range<usize>) -> Result<Vec<f64>> {
        self.as_slice().read(range)
    }
}

/// In-memory sink, keyed by identifier. Later writes replace earlier ones.
impl SequenceSink for HashMap<String, Vec<f64>> {
    fn write(&mut self, id: &str, samples: &[f64]) -> Result<()> {
        self.insert(id.to_owned(), samples.to_vec());
        Ok(())
    }
}

pub(crate) fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
    if range.start > range.end || range.end > len {
        return Err(Error::OutOfRange(format!(
            "sample range {}..{} exceeds {len} available samples",
            range.start, range.end
        )));
    }
    Ok(())
}

/// Builds stride-1 `(input, output)` training windows from a sample run.
///
/// For every offset `i` in `0..N - W - O`, input row `i` is `samples[i..i + W]`
/// and output row `i` is `samples[i + W..i + W + O]`. Trailing samples that
/// cannot form a full pair are dropped; a run shorter than `W + O` yields zero
/// rows.
pub fn sliding_windows(
    samples: &[f64],
    input_width: usize,
    output_width: usize,
) -> Result<(Matrix, Matrix)> {
    if input_width == 0 || output_width == 0 {
        return Err(Error::InvalidConfig(format!(
            "window widths must be > 0, got input={input_width} output={output_width}"
        )));
    }
    let span = input_width.checked_add(output_width).ok_or_else(|| {
        Error::InvalidConfig(format!("window widths {input_width} + {output_width} overflow"))
    })?;
    let rows = samples.len().saturating_sub(span);
    let mut input = Vec::with_capacity(element_count(rows, input_width)?);
    let mut output = Vec::with_capacity(element_count(rows, output_width)?);
    for i in 0..rows {
        let split = i + input_width;
        input.extend_from_slice(&samples[i..split]);
        output.extend_from_slice(&samples[split..split + output_width]);
    }
    Ok((
        Matrix::from_flat(input, rows, input_width)?,
        Matrix::from_flat(output, rows, output_width)?,
    ))
}

/// [`sliding_windows`] with a single target: predict the next sample from the previous `W`.
pub fn next_sample_windows(samples: &[f64], input_width: usize) -> Result<(Matrix, Matrix)> {
    sliding_windows(samples, input_width, 1)
}

/// Input-only stride-1 windows: the `N - W` rows `samples[i..i + W]`.
///
/// Used to run a trained predictor across a whole recording.
pub fn input_windows(samples: &[f64], input_width: usize) -> Result<Matrix> {
    if input_width == 0 {
        return Err(Error::InvalidConfig("window width must be > 0".to_owned()));
    }
    let rows = samples.len().saturating_sub(input_width);
    let mut data = Vec::with_capacity(element_count(rows, input_width)?);
    for i in 0..rows {
        data.extend_from_slice(&samples[i..i + input_width]);
    }
    Matrix::from_flat(data, rows, input_width)
}

/// Reads `range` from `source` and turns it into a predictive training dataset.
///
/// Normalization is applied later by the dataset to each whole matrix, so every
/// window shares one global scale.
pub fn predictive_dataset<S: SampleSource + ?Sized>(
    source: &S,
    range: Range<usize>,
    input_width: usize,
    output_width: usize,
    value_range: ValueRange,
) -> Result<TrainingDataset> {
    let samples = source.read(range.clone())?;
    let (input, output) = sliding_windows(&samples, input_width, output_width)?;
    let mut ds = TrainingDataset::regression(input_width, output_width, value_range, value_range)?;
    for (x, y) in input.iter_rows().zip(output.iter_rows()) {
        ds.add_row(x, y)?;
    }
    debug!(
        start = range.start,
        end = range.end,
        rows = ds.len(),
        "built predictive dataset"
    );
    Ok(ds)
}

/// Flattens a matrix of consecutive blocks, row-major, into one continuous sequence.
pub fn stitch(blocks: &Matrix) -> Vec<f64> {
    blocks.as_slice().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn sliding_windows_row_count_and_contents() {
        let s = ramp(10);
        let (x, y) = sliding_windows(&s, 3, 2).unwrap();
        assert_eq!(x.shape(), (5, 3));
        assert_eq!(y.shape(), (5, 2));
        for i in 0..x.rows() {
            assert_eq!(x.row(i), &s[i..i + 3]);
            assert_eq!(y.row(i), &s[i + 3..i + 5]);
        }
    }

    #[test]
    fn short_sequences_yield_no_rows() {
        for n in 0..=5 {
            let (x, y) = sliding_windows(&ramp(n), 3, 2).unwrap();
            assert_eq!(x.rows(), 0);
            assert_eq!(y.rows(), 0);
            assert_eq!(x.cols(), 3);
        }
        assert_eq!(sliding_windows(&ramp(6), 3, 2).unwrap().0.rows(), 1);
    }

    #[test]
    fn overflowing_window_widths_are_config_errors() {
        let s = ramp(8);
        assert!(matches!(
            sliding_windows(&s, usize::MAX, 2),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            predictive_dataset(&s, 0..8, 3, usize::MAX, ValueRange::unit()),
            Err(Error::InvalidConfig(_))
        ));
        // A window wider than the run is not an overflow, just zero rows.
        assert_eq!(input_windows(&s, usize::MAX).unwrap().rows(), 0);
    }

    #[test]
    fn next_sample_targets_follow_the_window() {
        let s = ramp(6);
        let (x, y) = next_sample_windows(&s, 2).unwrap();
        assert_eq!(x.rows(), 3);
        assert_eq!(y.as_slice(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn input_windows_cover_the_recording() {
        let w = input_windows(&ramp(5), 2).unwrap();
        assert_eq!(w.shape(), (3, 2));
        assert_eq!(w.row(2), &[2.0, 3.0]);
    }

    #[test]
    fn source_rejects_ranges_past_the_end() {
        let s = ramp(4);
        assert_eq!(s.read(1..3).unwrap(), vec![1.0, 2.0]);
        assert!(matches!(s.read(2..5), Err(Error::OutOfRange(_))));
        let err = predictive_dataset(&s, 0..8, 2, 1, ValueRange::unit()).unwrap_err();
        assert!(matches!(err, Error::OutOfRange(_)));
    }

    #[test]
    fn predictive_dataset_normalizes_globally() {
        let s: Vec<f64> = vec![-1.0, -0.5, 0.0, 0.5, 1.0, 0.5, 0.0];
        let ds = predictive_dataset(&s, 0..7, 2, 2, ValueRange::signed_unit()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.normalized_input().row(0), &[0.0, 0.25]);
        assert_eq!(ds.normalized_output().row(0), &[0.5, 0.75]);
    }

    #[test]
    fn stitch_concatenates_blocks() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(stitch(&m), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn map_sink_stores_by_id() {
        let mut sink: HashMap<String, Vec<f64>> = HashMap::new();
        sink.write("take", &[0.1, 0.2]).unwrap();
        assert_eq!(sink["take"], vec![0.1, 0.2]);
    }
}
