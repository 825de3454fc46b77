use crate::errors::LieCryptoError;
use crate::matrix::{Matrix, Vector};
use crate::sle::solve;

/// Computes the matrix product `C = AB`.
///
/// # Errors
///
/// Returns `LieCryptoError::DimensionMismatch` if the inner dimensions of
/// the matrices do not match or if rows within the matrices have
/// inconsistent lengths.
pub fn matrix_mul(a: &Matrix, b: &Matrix) -> Result<Matrix, LieCryptoError> {
    let n = a.len(); // rows in A
    if n == 0 {
        return Ok(Matrix::new());
    }
    let m_common = a[0].len(); // cols in A

    if b.len() != m_common {
        return Err(LieCryptoError::DimensionMismatch(format!(
            "Inner dimensions must match for matrix multiplication ({} vs {})",
            m_common,
            b.len()
        )));
    }
    let p = if m_common == 0 { 0 } else { b[0].len() }; // cols in B

    let mut c = vec![vec![0.0; p]; n];

    for i in 0..n {
        if a[i].len() != m_common {
            return Err(LieCryptoError::DimensionMismatch(format!(
                "Matrix A row {} has incorrect length (expected {})",
                i, m_common
            )));
        }
        for j in 0..p {
            let mut sum = 0.0;
            #[allow(clippy::needless_range_loop)]
            for k in 0..m_common {
                if b[k].len() != p {
                    return Err(LieCryptoError::DimensionMismatch(format!(
                        "Matrix B row {} has incorrect length (expected {})",
                        k, p
                    )));
                }
                sum += a[i][k] * b[k][j];
            }
            c[i][j] = sum;
        }
    }
    Ok(c)
}

/// Computes the matrix sum `C = A + B`.
///
/// # Errors
///
/// Returns `LieCryptoError::DimensionMismatch` if the matrices have
/// different shapes.
pub fn matrix_add(a: &Matrix, b: &Matrix) -> Result<Matrix, LieCryptoError> {
    elementwise(a, b, "addition", |x, y| x + y)
}

/// Computes the matrix difference `C = A - B`.
///
/// # Errors
///
/// Returns `LieCryptoError::DimensionMismatch` if the matrices have
/// different shapes.
pub fn matrix_sub(a: &Matrix, b: &Matrix) -> Result<Matrix, LieCryptoError> {
    elementwise(a, b, "subtraction", |x, y| x - y)
}

fn elementwise(
    a: &Matrix,
    b: &Matrix,
    op: &str,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Matrix, LieCryptoError> {
    if a.len() != b.len() {
        return Err(LieCryptoError::DimensionMismatch(format!(
            "Row counts must match for {} ({} vs {})",
            op,
            a.len(),
            b.len()
        )));
    }
    let mut c = Vec::with_capacity(a.len());
    for (i, (ra, rb)) in a.iter().zip(b.iter()).enumerate() {
        if ra.len() != rb.len() {
            return Err(LieCryptoError::DimensionMismatch(format!(
                "Row {} lengths must match for {} ({} vs {})",
                i,
                op,
                ra.len(),
                rb.len()
            )));
        }
        c.push(ra.iter().zip(rb.iter()).map(|(&x, &y)| f(x, y)).collect());
    }
    Ok(c)
}

/// Multiplies every entry of a matrix by a scalar.
pub fn scalar_mul(a: &Matrix, s: f64) -> Matrix {
    a.iter()
        .map(|row| row.iter().map(|&x| x * s).collect())
        .collect()
}

/// Creates an identity matrix of size `n`.
pub fn identity_matrix(n: usize) -> Matrix {
    let mut identity = vec![vec![0.0; n]; n];
    #[allow(clippy::needless_range_loop)]
    for i in 0..n {
        identity[i][i] = 1.0;
    }
    identity
}

/// Sum of the diagonal entries of a square matrix.
///
/// # Errors
///
/// Returns `LieCryptoError::DimensionMismatch` if the matrix is not square.
pub fn trace(a: &Matrix) -> Result<f64, LieCryptoError> {
    let n = a.len();
    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(LieCryptoError::DimensionMismatch(format!(
                "trace: row {} has length {} but expected {}",
                i,
                row.len(),
                n
            )));
        }
    }
    Ok((0..n).map(|i| a[i][i]).sum())
}

/// Transpose of an m×n matrix.
pub fn transpose(a: &Matrix) -> Matrix {
    let m = a.len();
    if m == 0 {
        return Matrix::new();
    }
    let n = a[0].len();
    (0..n).map(|j| (0..m).map(|i| a[i][j]).collect()).collect()
}

/// Kronecker product `A ⊗ B` of an m×n matrix with a p×q matrix,
/// yielding an mp×nq matrix of scaled B-blocks.
pub fn kron(a: &Matrix, b: &Matrix) -> Matrix {
    let m = a.len();
    if m == 0 || b.is_empty() {
        return Matrix::new();
    }
    let n = a[0].len();
    let p = b.len();
    let q = b[0].len();

    let mut c = vec![vec![0.0; n * q]; m * p];
    for i in 0..m {
        for j in 0..n {
            let aij = a[i][j];
            for r in 0..p {
                for s in 0..q {
                    c[i * p + r][j * q + s] = aij * b[r][s];
                }
            }
        }
    }
    c
}

/// Raises a square matrix to a non-negative integer power by binary
/// exponentiation.
///
/// # Errors
///
/// Returns `LieCryptoError::DimensionMismatch` if the matrix is not square.
pub fn matrix_power(a: &Matrix, e: usize) -> Result<Matrix, LieCryptoError> {
    let n = a.len();
    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(LieCryptoError::DimensionMismatch(format!(
                "matrix_power: row {} has length {} but expected {}",
                i,
                row.len(),
                n
            )));
        }
    }

    let mut result = identity_matrix(n);
    let mut base = a.clone();
    let mut exp = e;
    while exp > 0 {
        if exp & 1 == 1 {
            result = matrix_mul(&result, &base)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = matrix_mul(&base, &base)?;
        }
    }
    Ok(result)
}

/// Attempts to find the inverse of a square matrix.
///
/// Built one column at a time by solving `A x = e_j` with the dense solver,
/// so a singular input surfaces as `LieCryptoError::SingularSystem`.
pub fn matrix_inverse(matrix: &Matrix) -> Result<Matrix, LieCryptoError> {
    let n = matrix.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    for row in matrix.iter() {
        if row.len() != n {
            return Err(LieCryptoError::DimensionMismatch(
                "matrix_inverse: matrix must be square".into(),
            ));
        }
    }

    let mut inv = vec![vec![0.0; n]; n];
    for j in 0..n {
        // RHS = standard basis vector e_j
        let mut b = vec![0.0; n];
        b[j] = 1.0;
        let x = solve(matrix, &b)?;
        for i in 0..n {
            inv[i][j] = x[i];
        }
    }
    Ok(inv)
}

/// Flattens a matrix to a vector in row-major order.
pub fn flatten(a: &Matrix) -> Vector {
    a.iter().flat_map(|row| row.iter().copied()).collect()
}

/// Reshapes a flat vector into a rows×cols matrix in row-major order.
///
/// # Errors
///
/// Returns `LieCryptoError::DimensionMismatch` if the vector length is not
/// `rows * cols`.
pub fn reshape(v: &Vector, rows: usize, cols: usize) -> Result<Matrix, LieCryptoError> {
    if v.len() != rows * cols {
        return Err(LieCryptoError::DimensionMismatch(format!(
            "reshape: vector length {} does not match {}x{}",
            v.len(),
            rows,
            cols
        )));
    }
    Ok(v.chunks(cols).map(|chunk| chunk.to_vec()).collect())
}

/// Frobenius norm, the square root of the sum of squared entries.
pub fn frobenius_norm(a: &Matrix) -> f64 {
    a.iter()
        .flat_map(|row| row.iter())
        .map(|&x| x * x)
        .sum::<f64>()
        .sqrt()
}
