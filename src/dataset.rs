//! Supervised training data.
//!
//! A `TrainingDataset` pairs an input matrix with a target matrix row for row.
//! Rows are stored raw and appended one at a time; the normalization bounds
//! fixed at construction are applied when the network reads the data.

use tracing::debug;

use crate::{CategoryLayout, Error, Matrix, Result, ValueRange};

#[derive(Debug, Clone)]
pub struct TrainingDataset {
    input: Matrix,
    output: Matrix,
    input_range: ValueRange,
    output_range: ValueRange,
    layout: Option<CategoryLayout>,
}

impl TrainingDataset {
    /// A dataset of raw `(input, output)` pairs, e.g. waveform windows.
    pub fn regression(
        input_width: usize,
        output_width: usize,
        input_range: ValueRange,
        output_range: ValueRange,
    ) -> Result<Self> {
        if input_width == 0 || output_width == 0 {
            return Err(Error::InvalidConfig(format!(
                "dataset widths must be > 0, got input={input_width} output={output_width}"
            )));
        }
        input_range.validate()?;
        output_range.validate()?;
        Ok(Self {
            input: Matrix::empty(input_width),
            output: Matrix::empty(output_width),
            input_range,
            output_range,
            layout: None,
        })
    }

    /// A classification dataset whose targets are one-hot per category group.
    ///
    /// Targets are already in `[0, 1]`, so the output range is the unit interval.
    pub fn classifier(
        input_width: usize,
        input_range: ValueRange,
        layout: CategoryLayout,
    ) -> Result<Self> {
        let mut ds = Self::regression(input_width, layout.width(), input_range, ValueRange::unit())?;
        ds.layout = Some(layout);
        Ok(ds)
    }

    /// Appends one raw `(input, output)` pair.
    pub fn add_row(&mut self, input: &[f64], output: &[f64]) -> Result<()> {
        if input.len() != self.input_width() {
            return Err(Error::ShapeMismatch(format!(
                "input row has len {}, dataset input width is {}",
                input.len(),
                self.input_width()
            )));
        }
        if output.len() != self.output_width() {
            return Err(Error::ShapeMismatch(format!(
                "output row has len {}, dataset output width is {}",
                output.len(),
                self.output_width()
            )));
        }
        if input.iter().chain(output).any(|v| !v.is_finite()) {
            return Err(Error::InvalidData(
                "training rows must contain only finite values".to_owned(),
            ));
        }
        self.input.push_row(input)?;
        self.output.push_row(output)
    }

    /// Appends one classification example: raw input values plus one label per group.
    pub fn add_training_data(&mut self, raw_input: &[f64], labels: &[&str]) -> Result<()> {
        let layout = self.layout.as_ref().ok_or_else(|| {
            Error::InvalidConfig("dataset has no category layout".to_owned())
        })?;
        let target = layout.encode(labels)?;
        self.add_row(raw_input, &target)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.input.rows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    #[inline]
    pub fn input_width(&self) -> usize {
        self.input.cols()
    }

    #[inline]
    pub fn output_width(&self) -> usize {
        self.output.cols()
    }

    /// Raw inputs as appended.
    pub fn input(&self) -> &Matrix {
        &self.input
    }

    /// Raw targets as appended.
    pub fn output(&self) -> &Matrix {
        &self.output
    }

    pub fn input_range(&self) -> ValueRange {
        self.input_range
    }

    pub fn output_range(&self) -> ValueRange {
        self.output_range
    }

    pub fn layout(&self) -> Option<&CategoryLayout> {
        self.layout.as_ref()
    }

    /// The whole input matrix mapped onto `[0, 1]` with one global scale.
    pub fn normalized_input(&self) -> Matrix {
        self.input.normalize_in(&self.input_range)
    }

    /// The whole target matrix mapped onto `[0, 1]` with one global scale.
    pub fn normalized_output(&self) -> Matrix {
        self.output.normalize_in(&self.output_range)
    }

    /// Normalizes raw query rows with this dataset's input range.
    pub fn normalize_input(&self, raw: &Matrix) -> Result<Matrix> {
        if raw.cols() != self.input_width() {
            return Err(Error::ShapeMismatch(format!(
                "query has {} cols, dataset input width is {}",
                raw.cols(),
                self.input_width()
            )));
        }
        Ok(raw.normalize_in(&self.input_range))
    }

    /// Maps network output back into this dataset's output range.
    pub fn denormalize_output(&self, out: &Matrix) -> Result<Matrix> {
        if out.cols() != self.output_width() {
            return Err(Error::ShapeMismatch(format!(
                "output has {} cols, dataset output width is {}",
                out.cols(),
                self.output_width()
            )));
        }
        Ok(out.denormalize_in(&self.output_range))
    }

    /// Per-category certainty of one inference output row.
    ///
    /// See [`CategoryLayout::certainty_percentages`].
    pub fn certainty_percentages(&self, output_row: &[f64]) -> Result<Vec<u32>> {
        self.require_layout()?.certainty_percentages(output_row)
    }

    /// Label of output column `index`.
    pub fn output_name(&self, index: usize) -> Result<&str> {
        self.require_layout()?.output_name(index)
    }

    fn require_layout(&self) -> Result<&CategoryLayout> {
        self.layout.as_ref().ok_or_else(|| {
            Error::InvalidConfig("dataset has no category layout".to_owned())
        })
    }

    pub(crate) fn log_summary(&self) {
        debug!(
            rows = self.len(),
            input_width = self.input_width(),
            output_width = self.output_width(),
            classifier = self.layout.is_some(),
            "training dataset attached"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CategoryGroup;

    fn layout() -> CategoryLayout {
        CategoryLayout::new(vec![
            CategoryGroup::new("side", &["left", "right"]).unwrap(),
            CategoryGroup::new("tone", &["dark", "light"]).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn add_training_data_appends_one_hot_targets() {
        let mut ds =
            TrainingDataset::classifier(3, ValueRange::new(0.0, 255.0).unwrap(), layout())
                .unwrap();
        ds.add_training_data(&[255.0, 0.0, 255.0], &["right", "dark"])
            .unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.output().row(0), &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(ds.normalized_input().row(0), &[1.0, 0.0, 1.0]);
        assert_eq!(ds.output_name(3).unwrap(), "light");
    }

    #[test]
    fn add_training_data_rejects_wrong_input_width() {
        let mut ds = TrainingDataset::classifier(3, ValueRange::unit(), layout()).unwrap();
        let err = ds
            .add_training_data(&[1.0, 2.0], &["left", "dark"])
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
        assert!(ds.is_empty());
    }

    #[test]
    fn regression_rows_have_no_labels() {
        let mut ds = TrainingDataset::regression(
            2,
            1,
            ValueRange::signed_unit(),
            ValueRange::signed_unit(),
        )
        .unwrap();
        ds.add_row(&[-1.0, 1.0], &[0.0]).unwrap();
        assert_eq!(ds.normalized_input().row(0), &[0.0, 1.0]);
        assert_eq!(ds.normalized_output().row(0), &[0.5]);
        assert!(ds.add_training_data(&[0.0, 0.0], &["left"]).is_err());
        assert!(ds.certainty_percentages(&[0.5]).is_err());
    }

    #[test]
    fn output_maps_back_into_its_range() {
        let wide = ValueRange::new(-4.0, 12.0).unwrap();
        let mut ds = TrainingDataset::regression(2, 2, ValueRange::unit(), wide).unwrap();
        ds.add_row(&[0.25, 0.75], &[-4.0, 8.0]).unwrap();
        assert_eq!(ds.normalized_output().row(0), &[0.0, 0.75]);

        let back = ds.denormalize_output(&ds.normalized_output()).unwrap();
        assert_eq!(back.row(0), &[-4.0, 8.0]);

        let query = Matrix::row_vector(&[0.5, 1.0]);
        assert_eq!(ds.normalize_input(&query).unwrap(), query);
        assert!(matches!(
            ds.denormalize_output(&Matrix::row_vector(&[0.5])),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn rejects_zero_width_range() {
        let bad = ValueRange { min: 1.0, max: 1.0 };
        assert!(matches!(
            TrainingDataset::regression(1, 1, bad, ValueRange::unit()),
            Err(Error::InvalidConfig(_))
        ));
    }
}
