//! Weight snapshots (JSON behind feature `serde`).
//!
//! A snapshot holds exactly what is needed to rebuild a trained network: the
//! hyperparameters and both weight matrices. Training data is not saved.
//!
//! Design notes:
//! - `SerializedNetwork` is a separate type from `NeuralNetwork` so the file
//!   format does not move when the in-memory representation does.
//! - Loading validates the version, both shapes and finiteness of every weight.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Matrix, NetworkConfig, NeuralNetwork, Result};

#[cfg(feature = "serde")]
use std::path::{Path, PathBuf};

pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedNetwork {
    pub format_version: u32,
    pub config: NetworkConfig,
    /// `(input_width, hidden_width)`.
    pub input_hidden: SerializedMatrix,
    /// `(hidden_width, output_width)`.
    pub hidden_output: SerializedMatrix,
}

/// Row-major matrix with explicit shape.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedMatrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl From<&Matrix> for SerializedMatrix {
    fn from(m: &Matrix) -> Self {
        Self {
            rows: m.rows(),
            cols: m.cols(),
            data: m.as_slice().to_vec(),
        }
    }
}

impl SerializedMatrix {
    fn into_matrix(self, name: &str) -> Result<Matrix> {
        let expected = self
            .rows
            .checked_mul(self.cols)
            .ok_or_else(|| Error::InvalidData(format!("{name} shape overflow")))?;
        if self.data.len() != expected {
            return Err(Error::InvalidData(format!(
                "{name} data length {} does not match rows * cols ({} * {})",
                self.data.len(),
                self.rows,
                self.cols
            )));
        }
        Matrix::from_flat(self.data, self.rows, self.cols)
    }
}

impl SerializedNetwork {
    pub fn validate(&self) -> Result<()> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(Error::InvalidData(format!(
                "unsupported snapshot format_version {}; expected {}",
                self.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }
        self.config
            .validate()
            .map_err(|e| Error::InvalidData(format!("invalid config: {e}")))?;
        Ok(())
    }
}

impl TryFrom<&NeuralNetwork> for SerializedNetwork {
    type Error = Error;

    fn try_from(net: &NeuralNetwork) -> std::result::Result<Self, Self::Error> {
        let (ih, ho) = net
            .input_hidden()
            .zip(net.hidden_output())
            .ok_or_else(|| {
                Error::MissingTrainingData("cannot snapshot an untrained network".to_owned())
            })?;
        Ok(Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            config: *net.config(),
            input_hidden: SerializedMatrix::from(ih),
            hidden_output: SerializedMatrix::from(ho),
        })
    }
}

impl TryFrom<SerializedNetwork> for NeuralNetwork {
    type Error = Error;

    fn try_from(value: SerializedNetwork) -> std::result::Result<Self, Self::Error> {
        value.validate()?;
        let ih = value.input_hidden.into_matrix("input_hidden")?;
        let ho = value.hidden_output.into_matrix("hidden_output")?;
        // from_weights checks the inner dimension and finiteness.
        NeuralNetwork::from_weights(value.config, ih, ho)
            .map_err(|e| Error::InvalidData(format!("snapshot weights invalid: {e}")))
    }
}

/// Saves and restores trained networks by identifier.
pub trait WeightStore {
    fn save(&mut self, network: &NeuralNetwork, id: &str) -> Result<()>;
    fn load(&self, id: &str) -> Result<NeuralNetwork>;
}

/// In-memory store.
impl WeightStore for HashMap<String, SerializedNetwork> {
    fn save(&mut self, network: &NeuralNetwork, id: &str) -> Result<()> {
        self.insert(id.to_owned(), SerializedNetwork::try_from(network)?);
        Ok(())
    }

    fn load(&self, id: &str) -> Result<NeuralNetwork> {
        let snap = self
            .get(id)
            .ok_or_else(|| Error::InvalidData(format!("no snapshot named '{id}'")))?;
        NeuralNetwork::try_from(snap.clone())
    }
}

#[cfg(feature = "serde")]
impl NeuralNetwork {
    /// Serialize the trained network to a pretty-printed JSON string.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        let ser = SerializedNetwork::try_from(self)?;
        serde_json::to_string_pretty(&ser)
            .map_err(|e| Error::InvalidData(format!("failed to serialize network: {e}")))
    }

    /// Serialize the trained network to a compact JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        let ser = SerializedNetwork::try_from(self)?;
        serde_json::to_string(&ser)
            .map_err(|e| Error::InvalidData(format!("failed to serialize network: {e}")))
    }

    /// Parse a network from a JSON snapshot.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let ser: SerializedNetwork = serde_json::from_str(s)
            .map_err(|e| Error::InvalidData(format!("failed to parse snapshot json: {e}")))?;
        ser.try_into()
    }

    /// Save the network to a JSON file (pretty-printed).
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let s = self.to_json_string_pretty()?;
        let p = path.as_ref();
        std::fs::write(p, s)
            .map_err(|e| Error::InvalidData(format!("failed to write {}: {e}", p.display())))?;
        Ok(())
    }

    /// Load a network from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let s = std::fs::read_to_string(p)
            .map_err(|e| Error::InvalidData(format!("failed to read {}: {e}", p.display())))?;
        Self::from_json_str(&s)
    }
}

/// Stores each snapshot as `<dir>/<id>.json`.
#[cfg(feature = "serde")]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

#[cfg(feature = "serde")]
impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `id`. Ids are plain names, not paths.
    pub fn path_for(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(Error::InvalidData(format!(
                "snapshot id '{id}' must be a plain file name"
            )));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }
}

#[cfg(feature = "serde")]
impl WeightStore for JsonFileStore {
    fn save(&mut self, network: &NeuralNetwork, id: &str) -> Result<()> {
        let path = self.path_for(id)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            Error::InvalidData(format!("failed to create {}: {e}", self.dir.display()))
        })?;
        network.save_json(path)
    }

    fn load(&self, id: &str) -> Result<NeuralNetwork> {
        NeuralNetwork::load_json(self.path_for(id)?)
    }
}
