//! # Adapters
//!
//! Implementations of outbound ports.

pub mod ethabi_coder;
