#![allow(non_snake_case)]

pub mod algebra;
pub mod codec;
pub mod errors;
pub mod keypair;
pub mod matrix;
pub mod sle;
pub mod system;

pub use algebra::LieAlgebra;
pub use codec::BlockCodec;
pub use errors::LieCryptoError;
pub use keypair::{PrivateKey, PublicKey};
pub use system::CryptoSystem;
