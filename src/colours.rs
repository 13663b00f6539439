//! Built-in RGB colour classification set.
//!
//! Each example is an `(r, g, b)` triple in `[0, 255]` plus a constant bias
//! input, labelled with one colour, one brightness and one saturation. The
//! network has no bias terms, so the fourth input column stands in for them.

use crate::{CategoryGroup, CategoryLayout, Matrix, Result, TrainingDataset, ValueRange};

/// Value of the constant fourth input column.
pub const BIAS_INPUT: f64 = 255.0;

/// Range of a single colour channel.
pub const CHANNEL_RANGE: ValueRange = ValueRange {
    min: 0.0,
    max: 255.0,
};

/// Inputs per example: three channels plus the bias column.
pub const INPUT_WIDTH: usize = 4;

pub const COLOURS: [&str; 9] = [
    "red", "green", "blue", "purple", "yellow", "orange", "brown", "black", "white",
];
pub const BRIGHTNESS: [&str; 3] = ["dark", "medium", "light"];
pub const SATURATION: [&str; 3] = ["low", "medium", "high"];

const EXAMPLES: [([f64; 3], [&str; 3]); 32] = [
    // One of each colour at full saturation.
    ([255.0, 0.0, 0.0], ["red", "light", "high"]),
    ([0.0, 255.0, 0.0], ["green", "light", "high"]),
    ([0.0, 0.0, 255.0], ["blue", "light", "high"]),
    ([128.0, 0.0, 128.0], ["purple", "medium", "high"]),
    ([255.0, 255.0, 0.0], ["yellow", "light", "high"]),
    ([255.0, 0.0, 255.0], ["purple", "light", "high"]),
    ([255.0, 165.0, 0.0], ["orange", "light", "high"]),
    ([139.0, 60.0, 0.0], ["brown", "medium", "high"]),
    ([0.0, 0.0, 0.0], ["black", "dark", "low"]),
    ([255.0, 255.0, 255.0], ["white", "light", "low"]),
    // Tints and shades.
    ([210.0, 105.0, 30.0], ["brown", "light", "high"]),
    ([244.0, 164.0, 96.0], ["brown", "light", "medium"]),
    ([255.0, 228.0, 196.0], ["brown", "light", "low"]),
    ([2.0, 8.0, 13.0], ["brown", "dark", "high"]),
    ([144.0, 238.0, 144.0], ["green", "light", "medium"]),
    ([143.0, 188.0, 143.0], ["green", "light", "low"]),
    ([0.0, 0.0, 128.0], ["blue", "medium", "high"]),
    ([224.0, 255.0, 255.0], ["blue", "light", "low"]),
    ([250.0, 250.0, 210.0], ["yellow", "light", "low"]),
    ([216.0, 191.0, 216.0], ["purple", "light", "low"]),
    ([66.0, 9.0, 67.0], ["purple", "dark", "high"]),
    ([128.0, 128.0, 0.0], ["yellow", "medium", "high"]),
    ([220.0, 20.0, 60.0], ["red", "light", "high"]),
    ([178.0, 34.0, 34.0], ["red", "medium", "high"]),
    ([255.0, 127.0, 80.0], ["orange", "light", "medium"]),
    ([53.0, 33.0, 26.0], ["orange", "dark", "medium"]),
    ([36.0, 71.0, 34.0], ["green", "dark", "medium"]),
    ([50.0, 51.0, 64.0], ["blue", "dark", "low"]),
    ([58.0, 47.0, 48.0], ["red", "dark", "low"]),
    ([125.0, 121.0, 60.0], ["yellow", "medium", "medium"]),
    ([138.0, 74.0, 125.0], ["purple", "medium", "medium"]),
    ([47.0, 112.0, 54.0], ["green", "medium", "medium"]),
];

/// Unlabelled colours used to eyeball a trained classifier.
pub const PROBES: [[f64; 3]; 6] = [
    [132.0, 160.0, 70.0],
    [246.0, 255.0, 217.0],
    [102.0, 18.0, 186.0],
    [164.0, 100.0, 227.0],
    [103.0, 166.0, 166.0],
    [13.0, 144.0, 168.0],
];

/// Colour, brightness and saturation groups, in that column order (15 outputs).
pub fn layout() -> Result<CategoryLayout> {
    CategoryLayout::new(vec![
        CategoryGroup::new("colour", &COLOURS)?,
        CategoryGroup::new("brightness", &BRIGHTNESS)?,
        CategoryGroup::new("saturation", &SATURATION)?,
    ])
}

/// Network input row for one colour: the channels followed by [`BIAS_INPUT`].
#[inline]
pub fn input_row(rgb: [f64; 3]) -> [f64; INPUT_WIDTH] {
    [rgb[0], rgb[1], rgb[2], BIAS_INPUT]
}

/// The labelled training set.
pub fn dataset() -> Result<TrainingDataset> {
    let mut ds = TrainingDataset::classifier(INPUT_WIDTH, CHANNEL_RANGE, layout()?)?;
    for (rgb, labels) in EXAMPLES {
        ds.add_training_data(&input_row(rgb), &labels)?;
    }
    Ok(ds)
}

/// Raw (un-normalized) input rows for `colours`.
pub fn inputs(colours: &[[f64; 3]]) -> Result<Matrix> {
    let rows: Vec<Vec<f64>> = colours.iter().map(|c| input_row(*c).to_vec()).collect();
    if rows.is_empty() {
        return Ok(Matrix::empty(INPUT_WIDTH));
    }
    Matrix::from_rows(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_has_every_example_with_bias() {
        let ds = dataset().unwrap();
        assert_eq!(ds.len(), EXAMPLES.len());
        assert_eq!(ds.input_width(), 4);
        assert_eq!(ds.output_width(), 15);
        assert!(ds.input().iter_rows().all(|r| r[3] == BIAS_INPUT));
        // Every target row is one-hot in each of the three groups.
        for row in ds.output().iter_rows() {
            assert_eq!(row.iter().sum::<f64>(), 3.0);
        }
    }

    #[test]
    fn layout_names_columns_in_group_order() {
        let l = layout().unwrap();
        assert_eq!(l.output_name(0).unwrap(), "red");
        assert_eq!(l.output_name(9).unwrap(), "dark");
        assert_eq!(l.output_name(14).unwrap(), "high");
    }

    #[test]
    fn probe_inputs_carry_the_bias_column() {
        let m = inputs(&PROBES).unwrap();
        assert_eq!(m.shape(), (6, 4));
        assert_eq!(m.row(2), &[102.0, 18.0, 186.0, 255.0]);
        assert_eq!(inputs(&[]).unwrap().shape(), (0, 4));
    }
}
