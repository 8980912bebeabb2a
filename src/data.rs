//! On-disk data files.

use anyhow::{Context, Result};
use rmp_serde::{decode, encode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Time series stored as two parallel arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSet {
    pub time: Vec<f64>,
    pub flux: Vec<f64>,
}

impl ObservationSet {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Load a MessagePack-encoded observation set.
    pub fn load<P: AsRef<Path>>(file: P) -> Result<Self> {
        read_msgpack(file).context("failed to load observations")
    }

    /// Save the observation set MessagePack-encoded.
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        write_msgpack(self, file).context("failed to save observations")
    }
}

/// Dispersion computed at each candidate period.
///
/// `dispersion[i]` belongs to `periods[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionRecord {
    pub periods: Vec<f64>,
    pub dispersion: Vec<f64>,
}

impl DispersionRecord {
    pub fn load<P: AsRef<Path>>(file: P) -> Result<Self> {
        read_msgpack(file).context("failed to load dispersion")
    }

    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        write_msgpack(self, file).context("failed to save dispersion")
    }
}

fn read_msgpack<T: DeserializeOwned, P: AsRef<Path>>(file: P) -> Result<T> {
    let file = file.as_ref();
    let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
    let mut reader = BufReader::new(file);
    let value = decode::from_read(&mut reader).context("failed to deserialize value")?;
    Ok(value)
}

fn write_msgpack<T: Serialize, P: AsRef<Path>>(value: &T, file: P) -> Result<()> {
    let file = file.as_ref();
    let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(file);
    encode::write(&mut writer, value).context("failed to serialize value")?;
    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}
