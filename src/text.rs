//! Plain-text sample files: one floating-point sample per line.
//!
//! Blank lines and lines starting with `#` are ignored on read.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::{Error, Result, SampleSource, SequenceSink};

/// Samples parsed from a text file, held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextSamples {
    samples: Vec<f64>,
}

impl TextSamples {
    pub fn parse(text: &str) -> Result<Self> {
        let mut samples = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let value: f64 = line.parse().map_err(|e| {
                Error::InvalidData(format!("line {}: '{line}' is not a number: {e}", lineno + 1))
            })?;
            if !value.is_finite() {
                return Err(Error::InvalidData(format!(
                    "line {}: sample must be finite",
                    lineno + 1
                )));
            }
            samples.push(value);
        }
        Ok(Self { samples })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let text = fs::read_to_string(p)
            .map_err(|e| Error::InvalidData(format!("failed to read {}: {e}", p.display())))?;
        Self::parse(&text)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }
}

impl From<Vec<f64>> for TextSamples {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}

impl SampleSource for TextSamples {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn read(&self, range: Range<usize>) -> Result<Vec<f64>> {
        self.samples.as_slice().read(range)
    }
}

/// Writes each sequence to `<dir>/<id>`, one sample per line.
#[derive(Debug, Clone)]
pub struct TextFileSink {
    dir: PathBuf,
}

impl TextFileSink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn render(samples: &[f64]) -> String {
        let mut out = String::with_capacity(samples.len() * 12);
        for s in samples {
            out.push_str(&s.to_string());
            out.push('\n');
        }
        out
    }
}

impl SequenceSink for TextFileSink {
    fn write(&mut self, id: &str, samples: &[f64]) -> Result<()> {
        let path = self.dir.join(id);
        fs::write(&path, Self::render(samples))
            .map_err(|e| Error::InvalidData(format!("failed to write {}: {e}", path.display())))
    }
}
