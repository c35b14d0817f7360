//! Transport implementations for order-bench
//!
//! This crate provides implementations of the `Transport` trait for:
//!
//! - Plain HTTP(S) via reqwest

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod http;

pub use http::{HttpTransport, HttpTransportConfig, HttpTransportError};
