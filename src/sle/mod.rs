//! Dense linear-system solver over the reals.
//!
//! Solves A·x = b by Gaussian elimination with partial pivoting, plus a
//! least-squares fit through the normal equations. A pivot below the
//! tolerance means the coefficient matrix is (numerically) singular and is
//! reported as a typed error, never approximated around.

use crate::errors::LieCryptoError;
use crate::matrix::{Matrix, Vector};

/// Pivot magnitudes at or below this threshold are treated as zero.
const PIVOT_TOL: f64 = 1e-12;

/// Solves the square system `A·x = b`.
///
/// # Errors
///
/// Returns `LieCryptoError::DimensionMismatch` if `A` is not square or `b`
/// has the wrong length, and `LieCryptoError::SingularSystem` if no usable
/// pivot exists in some column.
pub fn solve(a: &Matrix, b: &Vector) -> Result<Vector, LieCryptoError> {
    let n = a.len();
    if b.len() != n {
        return Err(LieCryptoError::DimensionMismatch(format!(
            "Matrix rows ({}) must match vector length ({})",
            n,
            b.len()
        )));
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    // Augmented working copy [A | b]
    let mut aug = Vec::with_capacity(n);
    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(LieCryptoError::DimensionMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                row.len(),
                n
            )));
        }
        let mut r = row.clone();
        r.push(b[i]);
        aug.push(r);
    }

    // Forward elimination with partial pivoting
    for col in 0..n {
        let mut pivot_idx = col;
        let mut pivot_mag = aug[col][col].abs();
        for row in (col + 1)..n {
            let mag = aug[row][col].abs();
            if mag > pivot_mag {
                pivot_idx = row;
                pivot_mag = mag;
            }
        }
        if pivot_mag <= PIVOT_TOL {
            return Err(LieCryptoError::SingularSystem(format!(
                "No usable pivot in column {} (|pivot| = {:e})",
                col, pivot_mag
            )));
        }
        aug.swap(col, pivot_idx);

        let pivot = aug[col][col];
        for row in (col + 1)..n {
            let factor = aug[row][col] / pivot;
            if factor != 0.0 {
                for j in col..=n {
                    let delta = factor * aug[col][j];
                    aug[row][j] -= delta;
                }
            }
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut sum = aug[row][n];
        for j in (row + 1)..n {
            sum -= aug[row][j] * x[j];
        }
        x[row] = sum / aug[row][row];
    }
    Ok(x)
}

/// Least-squares fit of `A·x ≈ b` for an m×k matrix `A` via the normal
/// equations `AᵀA·x = Aᵀb`.
///
/// # Errors
///
/// Returns `LieCryptoError::SingularSystem` if the normal matrix is
/// singular (e.g. the columns of `A` are linearly dependent), and
/// `LieCryptoError::DimensionMismatch` on shape errors.
pub fn least_squares(a: &Matrix, b: &Vector) -> Result<Vector, LieCryptoError> {
    let m = a.len();
    if b.len() != m {
        return Err(LieCryptoError::DimensionMismatch(format!(
            "Matrix rows ({}) must match vector length ({})",
            m,
            b.len()
        )));
    }
    if m == 0 {
        return Ok(Vec::new());
    }
    let k = a[0].len();
    for (i, row) in a.iter().enumerate() {
        if row.len() != k {
            return Err(LieCryptoError::DimensionMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                row.len(),
                k
            )));
        }
    }

    // Gram matrix G = AᵀA (k×k) and right-hand side r = Aᵀb
    let mut gram = vec![vec![0.0; k]; k];
    let mut rhs = vec![0.0; k];
    for i in 0..k {
        for j in 0..k {
            gram[i][j] = (0..m).map(|row| a[row][i] * a[row][j]).sum();
        }
        rhs[i] = (0..m).map(|row| a[row][i] * b[row]).sum();
    }

    solve(&gram, &rhs)
}
