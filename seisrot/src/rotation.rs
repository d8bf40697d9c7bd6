//! Per-station 3x3 rotation matrices.
//!
//! Rows of a [`RotationMatrix`] are the N, E, Z directions of the
//! geographic frame; columns are the X, Y, Z axes of the Cartesian frame.
//! Each row holds the direction cosines of one geographic axis.

use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};
use crate::mode::Direction;

/// A 3x3 direction-cosine matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationMatrix {
    matrix: Array2<f64>,
}

impl RotationMatrix {
    /// Build a matrix from its three rows (N, E, Z).
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let mut matrix = Array2::zeros((3, 3));
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                matrix[[i, j]] = value;
            }
        }
        RotationMatrix { matrix }
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        RotationMatrix {
            matrix: Array2::eye(3),
        }
    }

    /// View the underlying 3x3 array.
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.matrix.view()
    }

    /// Rotate an `(nstep x 3)` amplitude matrix.
    ///
    /// Forward computes `A · Rᵗ`, inverse computes `A · R`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `amplitudes` does not have
    /// exactly three columns.
    pub fn apply(&self, amplitudes: &Array2<f64>, direction: Direction) -> Result<Array2<f64>> {
        if amplitudes.ncols() != 3 {
            return Err(Error::InvalidDimensions {
                rows: amplitudes.nrows(),
                cols: amplitudes.ncols(),
            });
        }

        Ok(match direction {
            Direction::Forward => amplitudes.dot(&self.matrix.t()),
            Direction::Inverse => amplitudes.dot(&self.matrix),
        })
    }

    /// Largest absolute deviation of `R · Rᵗ` from the identity.
    ///
    /// Zero for an exact rotation. The inverse transform relies on
    /// `R⁻¹ = Rᵗ`, so a large value means inverse output is distorted.
    pub fn orthonormality_error(&self) -> f64 {
        let product = self.matrix.dot(&self.matrix.t());
        let identity: Array2<f64> = Array2::eye(3);
        (&product - &identity)
            .iter()
            .fold(0.0_f64, |acc, &x| acc.max(x.abs()))
    }
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}
