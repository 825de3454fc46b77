//! # Block Codec Module
//!
//! Converts text to fixed-size byte blocks (and back) independently of the
//! algebra. A block is exactly n² bytes, reshaped row-major into an n×n
//! byte matrix. Padding is classic unauthenticated length-byte padding:
//! `unpad` trusts the trailing byte, so malformed input yields truncated or
//! nonsensical output without an error signal.

use crate::errors::LieCryptoError;

/// A raw message block: an n×n matrix of byte values.
pub type ByteMatrix = Vec<Vec<u8>>;

/// Codec for messages over n×n byte blocks (block size n²).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCodec {
    n: usize,
    block_size: usize,
}

impl BlockCodec {
    /// Creates a codec for n×n blocks.
    ///
    /// # Errors
    ///
    /// Returns `LieCryptoError::InvalidParameters` if `n` is zero.
    pub fn try_with(n: usize) -> Result<Self, LieCryptoError> {
        if n == 0 {
            return Err(LieCryptoError::InvalidParameters(
                "Block dimension n must be > 0".to_string(),
            ));
        }
        Ok(Self {
            n,
            block_size: n * n,
        })
    }

    /// Number of bytes per block (n²).
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Appends `p` copies of the byte value `p`, where
    /// `p = block_size − (len mod block_size)`. An already-aligned message
    /// receives a full block of padding, never zero padding.
    ///
    /// # Errors
    ///
    /// Returns `LieCryptoError::EncodingError` if the padding length does
    /// not fit in the single length byte (possible once block_size > 255,
    /// i.e. n ≥ 16); truncating it would make `unpad` strip the wrong
    /// amount.
    pub fn pad(&self, bytes: &[u8]) -> Result<Vec<u8>, LieCryptoError> {
        let padding_length = self.block_size - (bytes.len() % self.block_size);
        let Ok(padding_byte) = u8::try_from(padding_length) else {
            return Err(LieCryptoError::EncodingError(format!(
                "Padding length {} does not fit in the length byte (block size {})",
                padding_length, self.block_size
            )));
        };
        let mut padded = bytes.to_vec();
        padded.extend(std::iter::repeat_n(padding_byte, padding_length));
        Ok(padded)
    }

    /// Reads the last byte as the padding length and strips that many
    /// trailing bytes (saturating at the start of the input).
    ///
    /// No validation is performed on the padding content; input that was
    /// not produced by `pad` with the same block size yields arbitrary
    /// results.
    pub fn unpad(&self, bytes: &[u8]) -> Vec<u8> {
        let Some(&last) = bytes.last() else {
            return Vec::new();
        };
        let keep = bytes.len().saturating_sub(last as usize);
        bytes[..keep].to_vec()
    }

    /// UTF-8 encodes `text`, pads it, and slices it into n×n byte matrices
    /// in row-major order.
    ///
    /// # Errors
    ///
    /// Propagates `LieCryptoError::EncodingError` from `pad`.
    pub fn message_to_blocks(&self, text: &str) -> Result<Vec<ByteMatrix>, LieCryptoError> {
        let padded = self.pad(text.as_bytes())?;
        Ok(padded
            .chunks(self.block_size)
            .map(|block| block.chunks(self.n).map(|row| row.to_vec()).collect())
            .collect())
    }

    /// Flattens the blocks back to bytes, removes the padding, and decodes
    /// as UTF-8. Invalid byte sequences become replacement characters; this
    /// never fails.
    pub fn blocks_to_message(&self, blocks: &[ByteMatrix]) -> String {
        let mut bytes = Vec::with_capacity(blocks.len() * self.block_size);
        for block in blocks {
            for row in block {
                bytes.extend_from_slice(row);
            }
        }
        let unpadded = self.unpad(&bytes);
        String::from_utf8_lossy(&unpadded).into_owned()
    }
}
