//! Key material for the sl(n, ℝ) cryptosystem.
//!
//! Both keys are plain traceless-matrix data: the public key is an ordered
//! spanning set of a subspace of sl(n, ℝ), the private key a single element
//! sampled to lie outside that span. Keys are created once per session and
//! never mutated.

use crate::errors::LieCryptoError;
use crate::matrix::Matrix;

use serde::{Deserialize, Serialize};

/// Ordered basis of the public subalgebra. Order is mathematically
/// irrelevant but preserved byte-for-byte through serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKey {
    pub basis: Vec<Matrix>,
}

/// A single traceless matrix, sampled to fail the subalgebra membership
/// test against the public basis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateKey {
    pub element: Matrix,
}

impl PublicKey {
    /// Dimension k of the spanning set.
    pub fn subalgebra_dim(&self) -> usize {
        self.basis.len()
    }

    pub fn to_json(&self) -> Result<String, LieCryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, LieCryptoError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl PrivateKey {
    pub fn to_json(&self) -> Result<String, LieCryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, LieCryptoError> {
        Ok(serde_json::from_str(json)?)
    }
}
