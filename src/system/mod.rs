//! # Cryptosystem Module
//!
//! The asymmetric scheme over sl(n, ℝ): key generation, block encryption
//! and block decryption. Ciphertext is an ordered sequence of traceless
//! matrices, one per n²-byte message block.

use crate::algebra::LieAlgebra;
use crate::codec::{BlockCodec, ByteMatrix};
use crate::errors::LieCryptoError;
use crate::keypair::{PrivateKey, PublicKey};
use crate::matrix::{Matrix, matrix_add, trace};

use rand::Rng;
use tracing::{debug, warn};

/// Retry cap for the private-key rejection loop. The membership test
/// accepts almost every candidate, so the loop exiting by exhaustion is
/// the expected path; see `generate_keys`.
const KEYGEN_MAX_ATTEMPTS: usize = 16;

/// A cryptosystem instance with fixed matrix dimension `n` and public
/// subalgebra dimension `k`. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoSystem {
    algebra: LieAlgebra,
    codec: BlockCodec,
    subalgebra_dim: usize,
}

impl CryptoSystem {
    /// Creates a cryptosystem over n×n matrices with a k-dimensional
    /// public subalgebra.
    ///
    /// # Errors
    ///
    /// Returns `LieCryptoError::InvalidParameters` if `n` or `k` is zero.
    pub fn try_with(n: usize, subalgebra_dim: usize) -> Result<Self, LieCryptoError> {
        if subalgebra_dim == 0 {
            return Err(LieCryptoError::InvalidParameters(
                "Subalgebra dimension k must be > 0".to_string(),
            ));
        }
        Ok(Self {
            algebra: LieAlgebra::try_with(n)?,
            codec: BlockCodec::try_with(n)?,
            subalgebra_dim,
        })
    }

    /// The matrix dimension n.
    pub fn dim(&self) -> usize {
        self.algebra.dim()
    }

    /// The public subalgebra dimension k.
    pub fn subalgebra_dim(&self) -> usize {
        self.subalgebra_dim
    }

    /// Bytes per message block (n²).
    pub fn block_size(&self) -> usize {
        self.codec.block_size()
    }

    /// The underlying algebra toolkit.
    pub fn algebra(&self) -> &LieAlgebra {
        &self.algebra
    }

    /// The underlying block codec.
    pub fn codec(&self) -> &BlockCodec {
        &self.codec
    }

    /// Generates a key pair: a k-element public basis and a private element
    /// sampled until the membership test rejects it.
    ///
    /// The membership test never checks the least-squares residual and so
    /// accepts essentially every candidate; the rejection loop is kept as
    /// the observable retry contract but is capped, and the last candidate
    /// is kept when the cap is reached.
    pub fn generate_keys<R: Rng + ?Sized>(&self, rng: &mut R) -> (PublicKey, PrivateKey) {
        let basis = self.algebra.generate_subalgebra(self.subalgebra_dim, rng);

        let mut attempts = 0;
        let element = loop {
            attempts += 1;
            let candidate = self.algebra.random_element(rng);
            if !self.algebra.is_in_subalgebra(&candidate, &basis) {
                debug!(attempts, "membership test rejected a candidate");
                break candidate;
            }
            if attempts >= KEYGEN_MAX_ATTEMPTS {
                warn!(
                    attempts,
                    "membership test accepted every candidate, keeping the last one"
                );
                break candidate;
            }
        };

        debug!(
            n = self.dim(),
            k = self.subalgebra_dim,
            attempts,
            "generated key pair"
        );
        (PublicKey { basis }, PrivateKey { element })
    }

    /// Encrypts a message into one ciphertext matrix per block.
    ///
    /// Each block matrix M is scaled to [0, 1] and projected to
    /// R = project(M / 255); a fresh ephemeral element r is drawn per block
    /// and the ciphertext block is `[r, R] + R`. The public key is accepted
    /// as a parameter but is not folded into the per-block computation
    /// (literal source behavior; see DESIGN.md).
    ///
    /// # Errors
    ///
    /// Propagates `LieCryptoError::EncodingError` from the codec when the
    /// padding length does not fit in the length byte (block sizes > 255).
    pub fn encrypt<R: Rng + ?Sized>(
        &self,
        message: &str,
        public_key: &PublicKey,
        rng: &mut R,
    ) -> Result<Vec<Matrix>, LieCryptoError> {
        let blocks = self.codec.message_to_blocks(message)?;
        debug!(
            blocks = blocks.len(),
            basis = public_key.subalgebra_dim(),
            "encrypting message"
        );

        let mut encrypted = Vec::with_capacity(blocks.len());
        for block in &blocks {
            let normalized: Matrix = block
                .iter()
                .map(|row| row.iter().map(|&b| f64::from(b) / 255.0).collect())
                .collect();
            let r_mat = self.algebra.project(&normalized)?;
            let ephemeral = self.algebra.random_element(rng);
            let bracket = self.algebra.lie_bracket(&ephemeral, &r_mat)?;
            encrypted.push(matrix_add(&bracket, &r_mat)?);
        }
        Ok(encrypted)
    }

    /// Decrypts a ciphertext sequence back to text.
    ///
    /// Per block: `d = [key, C]`, then the bracket equation
    /// `[key, X] + X = d` is solved for R′, the projection's trace removal
    /// is undone with a trace term derived from R′ itself, and the entries
    /// are scaled back to bytes with clamp-and-round.
    ///
    /// # Errors
    ///
    /// Returns `LieCryptoError::SingularSystem` if the private key yields a
    /// non-invertible coefficient system for some block. Invalid UTF-8 in
    /// the reconstructed bytes is replaced, never an error.
    pub fn decrypt(
        &self,
        ciphertext: &[Matrix],
        private_key: &PrivateKey,
    ) -> Result<String, LieCryptoError> {
        let n = self.dim();
        debug!(blocks = ciphertext.len(), "decrypting message");

        let mut blocks: Vec<ByteMatrix> = Vec::with_capacity(ciphertext.len());
        for encrypted in ciphertext {
            let d = self.algebra.lie_bracket(&private_key.element, encrypted)?;
            let r_prime = self
                .algebra
                .solve_bracket_equation(&private_key.element, &d)?;

            let shift = trace(&r_prime)? / n as f64;
            let block: ByteMatrix = r_prime
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    row.iter()
                        .enumerate()
                        .map(|(j, &v)| {
                            let denormalized =
                                (v + if i == j { shift } else { 0.0 }) * 255.0;
                            denormalized.round().clamp(0.0, 255.0) as u8
                        })
                        .collect()
                })
                .collect();
            blocks.push(block);
        }

        Ok(self.codec.blocks_to_message(&blocks))
    }
}
