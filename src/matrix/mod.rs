#![allow(non_snake_case)]

//! # Dense Matrix Module
//!
//! Real n×n matrix arithmetic underlying the Lie-algebra toolkit. All
//! matrices are row-major `Vec<Vec<f64>>` with value semantics.

pub mod matrix_ops;

/// Represents a mathematical vector using a `Vec<f64>`.
pub type Vector = Vec<f64>;
/// Represents a mathematical matrix using a `Vec<Vec<f64>>` (row-major).
pub type Matrix = Vec<Vec<f64>>;

pub use matrix_ops::{
    flatten, frobenius_norm, identity_matrix, kron, matrix_add, matrix_inverse, matrix_mul,
    matrix_power, matrix_sub, reshape, scalar_mul, trace, transpose,
};
