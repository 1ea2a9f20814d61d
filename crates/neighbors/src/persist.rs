//! Saving and loading a trained [`NeighborIndex`].
//!
//! The file is a JSON document holding the matrix and the cached row norms.
//! Treat it as opaque: only [`NeighborIndex::load`] is expected to read it.
//! Loading re-checks the matrix lookups and every stored norm, so an edited
//! file is rejected instead of answering queries wrongly.

use crate::distance::norm;
use crate::error::{NeighborError, Result};
use crate::index::NeighborIndex;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Largest accepted gap between a stored norm and the one recomputed from its row
const NORM_TOLERANCE: f64 = 1e-6;

impl NeighborIndex {
    /// Write the index to `path`, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        info!("Index saved to {:?}", path);
        Ok(())
    }

    /// Read an index written by [`NeighborIndex::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let index: NeighborIndex = serde_json::from_reader(reader)?;

        if !index.matrix.is_well_formed() {
            return Err(NeighborError::CorruptIndex(
                "stored matrix is inconsistent".to_string(),
            ));
        }
        if index.norms.len() != index.matrix.n_users() {
            return Err(NeighborError::CorruptIndex(format!(
                "{} norms for {} users",
                index.norms.len(),
                index.matrix.n_users()
            )));
        }
        for (row, &stored) in index.norms.iter().enumerate() {
            let expected = norm(index.matrix.row(row));
            if !((stored - expected).abs() <= NORM_TOLERANCE * expected.max(1.0)) {
                return Err(NeighborError::CorruptIndex(format!(
                    "norm of row {} is {}, expected {}",
                    row, stored, expected
                )));
            }
        }

        info!("Index loaded from {:?} ({} users)", path, index.len());
        Ok(index)
    }
}
