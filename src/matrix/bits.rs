use crate::foundation::error::{QrShapeError, QrShapeResult};

/// Square grid of QR modules (`true` = dark).
///
/// Produced by an [`crate::Encoder`] and treated as immutable afterwards; geometry code only
/// reads it for the lifetime of one revision.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    dimension: usize,
    bits: Vec<bool>, // row-major
}

impl BitMatrix {
    /// Build a matrix from rows. Rejects empty and non-square input.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> QrShapeResult<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(QrShapeError::validation("bit matrix must not be empty"));
        }
        let mut bits = Vec::with_capacity(n * n);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(QrShapeError::validation(format!(
                    "bit matrix must be square: row {y} has {} modules, expected {n}",
                    row.len()
                )));
            }
            bits.extend_from_slice(row);
        }
        Ok(Self { dimension: n, bits })
    }

    /// Build an `n`×`n` matrix by evaluating `f(x, y)` for every module.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut bits = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                bits.push(f(x, y));
            }
        }
        Self { dimension: n, bits }
    }

    pub(crate) fn from_raw(dimension: usize, bits: Vec<bool>) -> QrShapeResult<Self> {
        if dimension == 0 || bits.len() != dimension * dimension {
            return Err(QrShapeError::validation(format!(
                "bit matrix payload has {} modules, expected {dimension}x{dimension}",
                bits.len()
            )));
        }
        Ok(Self { dimension, bits })
    }

    /// Number of modules per side.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Module at column `x`, row `y`; `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.dimension || y >= self.dimension {
            return None;
        }
        self.bits.get(y * self.dimension + x).copied()
    }

    pub fn count_dark(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/matrix/bits.rs"]
mod tests;
