//! Synthetic order generation
//!
//! This crate provides implementations of the `Sampler` trait for:
//!
//! - Random retail orders with valid EAN-13 barcodes
//!
//! Plus the EAN-13 checksum helpers they are built on.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ean13;
pub mod order;

pub use ean13::{ean13_check_digit, is_valid_ean13};
pub use order::OrderSampler;
