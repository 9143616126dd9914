//! Biometric token normalization and identity resolution

pub mod ports;
pub mod resolver;

pub use resolver::{normalize_token, TokenResolver};
