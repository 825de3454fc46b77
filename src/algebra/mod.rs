//! # Lie Algebra Module
//!
//! The algebraic toolkit over sl(n, ℝ): the space of traceless n×n real
//! matrices under the commutator [A, B] = AB − BA. Everything the key
//! generator and cipher need lives here; the exponential and logarithm are
//! part of the public surface but are not on the cipher path.

use crate::errors::LieCryptoError;
use crate::matrix::{
    Matrix, flatten, frobenius_norm, identity_matrix, kron, matrix_add, matrix_inverse,
    matrix_mul, matrix_power, matrix_sub, reshape, scalar_mul, transpose,
};
use crate::sle::{least_squares, solve};

use rand::Rng;

/// Iteration cap for the Denman–Beavers square-root loop.
const SQRT_MAX_ITERS: usize = 50;
/// Cap on square-root reductions before the logarithm gives up.
const LOG_MAX_SQUARINGS: u32 = 40;
/// Terms of the Mercator series log(I + X) = X − X²/2 + X³/3 − …
const LOG_SERIES_TERMS: usize = 30;

/// The Lie algebra sl(n, ℝ), parametrized by the matrix dimension `n`.
///
/// Carries no mutable state; all randomness comes from the caller-supplied
/// generator so that draws are seedable and reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LieAlgebra {
    n: usize,
}

impl LieAlgebra {
    /// Creates the algebra of traceless `n`×`n` matrices.
    ///
    /// # Errors
    ///
    /// Returns `LieCryptoError::InvalidParameters` if `n` is zero.
    pub fn try_with(n: usize) -> Result<Self, LieCryptoError> {
        if n == 0 {
            return Err(LieCryptoError::InvalidParameters(
                "Matrix dimension n must be > 0".to_string(),
            ));
        }
        Ok(Self { n })
    }

    /// The matrix dimension `n`.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Samples a random element of sl(n, ℝ): independent uniform [0, 1)
    /// entries, then projection onto the traceless subspace.
    pub fn random_element<R: Rng + ?Sized>(&self, rng: &mut R) -> Matrix {
        let m: Matrix = (0..self.n)
            .map(|_| (0..self.n).map(|_| rng.random::<f64>()).collect())
            .collect();
        self.project_square(&m)
    }

    /// Projects a matrix onto sl(n, ℝ): `M − (trace(M)/n)·I`.
    ///
    /// This is the sole mechanism for (re-)establishing the traceless
    /// invariant.
    ///
    /// # Errors
    ///
    /// Returns `LieCryptoError::DimensionMismatch` if `m` is not n×n.
    pub fn project(&self, m: &Matrix) -> Result<Matrix, LieCryptoError> {
        self.check_square(m, "project")?;
        Ok(self.project_square(m))
    }

    fn project_square(&self, m: &Matrix) -> Matrix {
        let tr: f64 = (0..self.n).map(|i| m[i][i]).sum();
        let shift = tr / self.n as f64;
        m.iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, &v)| if i == j { v - shift } else { v })
                    .collect()
            })
            .collect()
    }

    /// The Lie bracket (commutator) `[A, B] = AB − BA`.
    ///
    /// # Errors
    ///
    /// Returns `LieCryptoError::DimensionMismatch` if either argument is
    /// not n×n.
    pub fn lie_bracket(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, LieCryptoError> {
        self.check_square(a, "lie_bracket")?;
        self.check_square(b, "lie_bracket")?;
        let ab = matrix_mul(a, b)?;
        let ba = matrix_mul(b, a)?;
        matrix_sub(&ab, &ba)
    }

    /// The truncated-quadratic matrix exponential `(I + A + A²/2)^n`.
    ///
    /// Deliberately NOT an accurate exponential: downstream numerical
    /// behavior depends on this exact approximation.
    pub fn exp(&self, a: &Matrix) -> Result<Matrix, LieCryptoError> {
        self.check_square(a, "exp")?;
        let a_sq = matrix_mul(a, a)?;
        let quad = matrix_add(
            &matrix_add(&identity_matrix(self.n), a)?,
            &scalar_mul(&a_sq, 0.5),
        )?;
        matrix_power(&quad, self.n)
    }

    /// The principal matrix logarithm, by inverse scaling-and-squaring:
    /// repeated Denman–Beavers square roots bring `A` within Frobenius
    /// distance 1/2 of the identity, a truncated Mercator series takes the
    /// logarithm there, and the result is scaled back by `2^s`.
    ///
    /// # Errors
    ///
    /// Returns `LieCryptoError::SingularSystem` if an iterate is not
    /// invertible and `LieCryptoError::InternalError` if the reduction or
    /// the square-root iteration fails to converge.
    pub fn log(&self, a: &Matrix) -> Result<Matrix, LieCryptoError> {
        self.check_square(a, "log")?;
        let identity = identity_matrix(self.n);

        let mut t = a.clone();
        let mut squarings = 0u32;
        while frobenius_norm(&matrix_sub(&t, &identity)?) > 0.5 {
            if squarings >= LOG_MAX_SQUARINGS {
                return Err(LieCryptoError::InternalError(
                    "Matrix logarithm: square-root reduction did not converge".to_string(),
                ));
            }
            t = self.sqrtm(&t)?;
            squarings += 1;
        }

        let x = matrix_sub(&t, &identity)?;
        let mut acc = vec![vec![0.0; self.n]; self.n];
        let mut term = identity_matrix(self.n);
        for j in 1..=LOG_SERIES_TERMS {
            term = matrix_mul(&term, &x)?;
            let sign = if j % 2 == 1 { 1.0 } else { -1.0 };
            acc = matrix_add(&acc, &scalar_mul(&term, sign / j as f64))?;
        }

        Ok(scalar_mul(&acc, (1u64 << squarings) as f64))
    }

    /// One principal square root via the Denman–Beavers iteration.
    fn sqrtm(&self, a: &Matrix) -> Result<Matrix, LieCryptoError> {
        let mut y = a.clone();
        let mut z = identity_matrix(self.n);
        for _ in 0..SQRT_MAX_ITERS {
            let y_inv = matrix_inverse(&y)?;
            let z_inv = matrix_inverse(&z)?;
            let y_next = scalar_mul(&matrix_add(&y, &z_inv)?, 0.5);
            let z_next = scalar_mul(&matrix_add(&z, &y_inv)?, 0.5);
            let delta = frobenius_norm(&matrix_sub(&y_next, &y)?);
            y = y_next;
            z = z_next;
            if delta <= 1e-12 * frobenius_norm(&y).max(1.0) {
                return Ok(y);
            }
        }
        Err(LieCryptoError::InternalError(
            "Matrix square root: Denman–Beavers iteration did not converge".to_string(),
        ))
    }

    /// Solves the bracket equation `[s, X] + X = d` for `X`.
    ///
    /// `X` is vectorized by row-major flattening and the linear system
    /// `(I_n ⊗ s − sᵀ ⊗ I_n + I_{n²})·vec(X) = vec(d)` is solved densely.
    ///
    /// # Errors
    ///
    /// Returns `LieCryptoError::SingularSystem` when the coefficient matrix
    /// is not invertible, which the cipher surfaces as a decryption
    /// failure.
    pub fn solve_bracket_equation(
        &self,
        s: &Matrix,
        d: &Matrix,
    ) -> Result<Matrix, LieCryptoError> {
        self.check_square(s, "solve_bracket_equation")?;
        self.check_square(d, "solve_bracket_equation")?;
        let n = self.n;

        let identity = identity_matrix(n);
        let s_t = transpose(s);
        let big_s = matrix_sub(&kron(&identity, s), &kron(&s_t, &identity))?;
        let coeff = matrix_add(&big_s, &identity_matrix(n * n))?;

        let b = flatten(d);
        let x = solve(&coeff, &b)?;
        reshape(&x, n, n)
    }

    /// Tests whether `element` lies in the span of `basis` by a
    /// least-squares fit of the flattened vectors.
    ///
    /// The fit always produces *some* coefficients and the residual is
    /// deliberately never checked, so this returns `true` for essentially
    /// every input; `false` only when the underlying solve fails (e.g. a
    /// degenerate basis makes the normal matrix singular).
    pub fn is_in_subalgebra(&self, element: &Matrix, basis: &[Matrix]) -> bool {
        let flat_element = flatten(element);
        if flat_element.len() != self.n * self.n {
            return false;
        }

        let k = basis.len();
        let mut flat_basis = vec![vec![0.0; k]; self.n * self.n];
        for (j, member) in basis.iter().enumerate() {
            let flat = flatten(member);
            if flat.len() != flat_basis.len() {
                return false;
            }
            for (row, &v) in flat.iter().enumerate() {
                flat_basis[row][j] = v;
            }
        }

        least_squares(&flat_basis, &flat_element).is_ok()
    }

    /// Generates a "subalgebra" basis: `k` independently sampled random
    /// elements. No Lie-closure check is performed; the label refers to the
    /// span only.
    pub fn generate_subalgebra<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Vec<Matrix> {
        (0..k).map(|_| self.random_element(rng)).collect()
    }

    fn check_square(&self, m: &Matrix, op: &str) -> Result<(), LieCryptoError> {
        if m.len() != self.n {
            return Err(LieCryptoError::DimensionMismatch(format!(
                "{}: expected {} rows, got {}",
                op,
                self.n,
                m.len()
            )));
        }
        for (i, row) in m.iter().enumerate() {
            if row.len() != self.n {
                return Err(LieCryptoError::DimensionMismatch(format!(
                    "{}: row {} has length {} but expected {}",
                    op,
                    i,
                    row.len(),
                    self.n
                )));
            }
        }
        Ok(())
    }
}

/// Trace tolerance scaled by dimension, for invariant checks.
pub fn trace_tolerance(n: usize) -> f64 {
    1e-9 * n as f64
}
