//! Named output categories for classification datasets.
//!
//! A [`CategoryLayout`] partitions the output columns into independent groups
//! (e.g. colour, brightness, saturation). Each group owns a contiguous, disjoint
//! slice of columns, laid out in the order the groups were given, and a target
//! row is one-hot within every slice.

use std::ops::Range;

use crate::{Error, Result};

/// One independent group of mutually exclusive labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    name: String,
    labels: Vec<String>,
}

impl CategoryGroup {
    pub fn new(name: impl Into<String>, labels: &[&str]) -> Result<Self> {
        let name = name.into();
        if labels.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "category group '{name}' must have at least one label"
            )));
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(Error::InvalidConfig(format!(
                    "category group '{name}' repeats label '{label}'"
                )));
            }
        }
        Ok(Self {
            name,
            labels: labels.iter().map(|s| (*s).to_owned()).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false: construction rejects empty groups.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

/// Column layout of the output side of a classification dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLayout {
    groups: Vec<CategoryGroup>,
    /// Start column of each group; `offsets[g] + groups[g].len() == offsets[g + 1]`.
    offsets: Vec<usize>,
    width: usize,
}

impl CategoryLayout {
    pub fn new(groups: Vec<CategoryGroup>) -> Result<Self> {
        if groups.is_empty() {
            return Err(Error::InvalidConfig(
                "category layout must have at least one group".to_owned(),
            ));
        }
        let mut offsets = Vec::with_capacity(groups.len());
        let mut width = 0;
        for group in &groups {
            offsets.push(width);
            width += group.len();
        }
        Ok(Self {
            groups,
            offsets,
            width,
        })
    }

    /// Total number of output columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// Columns owned by group `group`.
    pub fn group_range(&self, group: usize) -> Result<Range<usize>> {
        let g = self.groups.get(group).ok_or_else(|| {
            Error::OutOfRange(format!(
                "group {group} out of range for {} groups",
                self.groups.len()
            ))
        })?;
        let start = self.offsets[group];
        Ok(start..start + g.len())
    }

    /// Group owning output column `index`.
    pub fn group_of(&self, index: usize) -> Option<usize> {
        if index >= self.width {
            return None;
        }
        // `offsets` is sorted; the owning group is the last offset <= index.
        Some(self.offsets.partition_point(|&o| o <= index) - 1)
    }

    /// Builds the one-hot target row for one label per group, in group order.
    pub fn encode(&self, labels: &[&str]) -> Result<Vec<f64>> {
        if labels.len() != self.groups.len() {
            return Err(Error::InvalidData(format!(
                "expected {} labels (one per group), got {}",
                self.groups.len(),
                labels.len()
            )));
        }
        let mut row = vec![0.0; self.width];
        for (g, (group, label)) in self.groups.iter().zip(labels).enumerate() {
            let pos = group.position(label).ok_or_else(|| {
                Error::InvalidData(format!(
                    "unknown label '{label}' for group '{}'",
                    group.name
                ))
            })?;
            row[self.offsets[g] + pos] = 1.0;
        }
        Ok(row)
    }

    /// Label of output column `index`.
    pub fn output_name(&self, index: usize) -> Result<&str> {
        let g = self.group_of(index).ok_or_else(|| {
            Error::OutOfRange(format!(
                "column {index} out of range for {} output columns",
                self.width
            ))
        })?;
        Ok(&self.groups[g].labels[index - self.offsets[g]])
    }

    /// Converts one output row into per-column integer percentages.
    ///
    /// Each column is divided by its group's sum, scaled by 100 and rounded to
    /// the nearest integer, independent of the other groups. Rounding can leave
    /// a group's total slightly off 100.
    pub fn certainty_percentages(&self, row: &[f64]) -> Result<Vec<u32>> {
        self.check_row(row)?;
        let mut out = vec![0_u32; self.width];
        for g in 0..self.groups.len() {
            let range = self.group_range(g)?;
            let sum: f64 = row[range.clone()].iter().sum();
            if !(sum > 0.0) {
                return Err(Error::InvalidData(format!(
                    "group '{}' has a non-positive activation sum",
                    self.groups[g].name
                )));
            }
            for c in range {
                out[c] = (row[c] / sum * 100.0).round() as u32;
            }
        }
        Ok(out)
    }

    /// Columns of group `group`, ordered by descending activation.
    ///
    /// The first entry is the network's best guess for that group.
    pub fn ranked(&self, row: &[f64], group: usize) -> Result<Vec<usize>> {
        self.check_row(row)?;
        let range = self.group_range(group)?;
        let mut cols: Vec<usize> = range.collect();
        cols.sort_by(|&a, &b| row[b].total_cmp(&row[a]));
        Ok(cols)
    }

    fn check_row(&self, row: &[f64]) -> Result<()> {
        if row.len() != self.width {
            return Err(Error::ShapeMismatch(format!(
                "output row has len {}, layout has {} columns",
                row.len(),
                self.width
            )));
        }
        if row.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::InvalidData(
                "output row must contain only finite, non-negative values".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> CategoryLayout {
        CategoryLayout::new(vec![
            CategoryGroup::new("shade", &["red", "green", "blue"]).unwrap(),
            CategoryGroup::new("level", &["low", "high"]).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn groups_occupy_contiguous_disjoint_slices() {
        let l = layout();
        assert_eq!(l.width(), 5);
        assert_eq!(l.group_range(0).unwrap(), 0..3);
        assert_eq!(l.group_range(1).unwrap(), 3..5);
        assert_eq!(l.group_of(2), Some(0));
        assert_eq!(l.group_of(3), Some(1));
        assert_eq!(l.group_of(5), None);
    }

    #[test]
    fn encode_is_one_hot_per_group() {
        let l = layout();
        assert_eq!(
            l.encode(&["blue", "low"]).unwrap(),
            vec![0.0, 0.0, 1.0, 1.0, 0.0]
        );
        assert!(matches!(
            l.encode(&["teal", "low"]),
            Err(Error::InvalidData(_))
        ));
        assert!(l.encode(&["red"]).is_err());
    }

    #[test]
    fn output_name_maps_back_through_the_layout() {
        let l = layout();
        assert_eq!(l.output_name(1).unwrap(), "green");
        assert_eq!(l.output_name(4).unwrap(), "high");
        assert!(matches!(l.output_name(5), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn certainty_sums_to_about_one_hundred_per_group() {
        let l = layout();
        let cert = l
            .certainty_percentages(&[0.2, 0.2, 0.2, 0.9, 0.1])
            .unwrap();
        assert_eq!(&cert[..3], &[33, 33, 33]);
        let shade: u32 = cert[..3].iter().sum();
        assert!((99..=101).contains(&shade));
        assert_eq!(&cert[3..], &[90, 10]);
    }

    #[test]
    fn certainty_rounds_each_column_to_nearest() {
        let l = layout();
        let cert = l
            .certainty_percentages(&[0.334, 0.333, 0.333, 0.5, 0.5])
            .unwrap();
        assert_eq!(&cert[..3], &[33, 33, 33]);
        assert_eq!(&cert[3..], &[50, 50]);

        let quad =
            CategoryLayout::new(vec![CategoryGroup::new("g", &["a", "b", "c", "d"]).unwrap()])
                .unwrap();
        let cert = quad
            .certainty_percentages(&[0.246, 0.246, 0.246, 0.262])
            .unwrap();
        assert_eq!(cert, vec![25, 25, 25, 26]);
    }

    #[test]
    fn certainty_rejects_bad_rows() {
        let l = layout();
        assert!(matches!(
            l.certainty_percentages(&[0.1, 0.2]),
            Err(Error::ShapeMismatch(_))
        ));
        assert!(matches!(
            l.certainty_percentages(&[0.0, 0.0, 0.0, 0.5, 0.5]),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn ranked_orders_by_activation_within_group() {
        let l = layout();
        let row = [0.1, 0.7, 0.3, 0.2, 0.6];
        assert_eq!(l.ranked(&row, 0).unwrap(), vec![1, 2, 0]);
        assert_eq!(l.ranked(&row, 1).unwrap(), vec![4, 3]);
    }

    #[test]
    fn group_rejects_duplicates_and_empty() {
        assert!(CategoryGroup::new("g", &[]).is_err());
        assert!(CategoryGroup::new("g", &["a", "a"]).is_err());
        assert!(CategoryLayout::new(vec![]).is_err());
    }
}
