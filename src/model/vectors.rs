//! Static word vectors (a `[rows, width]` table looked up by token id).

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::{Embedding, Module};

use super::error::ModelError;
use crate::constants::VECTORS_TENSOR_NAME;

pub struct StaticVectors {
    table: Embedding,
    rows: usize,
    width: usize,
    device: Device,
}

impl std::fmt::Debug for StaticVectors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticVectors")
            .field("rows", &self.rows)
            .field("width", &self.width)
            .field("device", &format!("{:?}", self.device))
            .finish()
    }
}

impl StaticVectors {
    /// Loads the `vectors` tensor from a safetensors file.
    pub fn load(path: &Path, device: &Device) -> Result<Self, ModelError> {
        let tensors = candle_core::safetensors::load(path, device).map_err(|e| {
            ModelError::LoadFailed {
                reason: format!("failed to read {}: {}", path.display(), e),
            }
        })?;

        let table = tensors
            .get(VECTORS_TENSOR_NAME)
            .ok_or_else(|| ModelError::LoadFailed {
                reason: format!(
                    "tensor '{}' not found in {}",
                    VECTORS_TENSOR_NAME,
                    path.display()
                ),
            })?
            .to_dtype(DType::F32)?;

        Self::from_tensor(table)
    }

    /// Wraps an already-built `[rows, width]` table.
    pub fn from_tensor(table: Tensor) -> Result<Self, ModelError> {
        let (rows, width) = table.dims2().map_err(|e| ModelError::LoadFailed {
            reason: format!("vector table must be 2-dimensional: {}", e),
        })?;
        let device = table.device().clone();

        Ok(Self {
            table: Embedding::new(table, width),
            rows,
            width,
            device,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// One vector per id. Ids outside the table get a zero vector.
    pub fn lookup(&self, ids: &[u32]) -> Result<Vec<Vec<f32>>, ModelError> {
        let known: Vec<u32> = ids
            .iter()
            .copied()
            .filter(|&id| (id as usize) < self.rows)
            .collect();

        let found: Vec<Vec<f32>> = if known.is_empty() {
            Vec::new()
        } else {
            let input = Tensor::new(known.as_slice(), &self.device)?;
            self.table.forward(&input)?.to_vec2::<f32>()?
        };
        let mut found = found.into_iter();

        let vectors = ids
            .iter()
            .map(|&id| {
                if (id as usize) < self.rows {
                    found.next().unwrap_or_else(|| vec![0.0; self.width])
                } else {
                    vec![0.0; self.width]
                }
            })
            .collect();

        Ok(vectors)
    }
}
