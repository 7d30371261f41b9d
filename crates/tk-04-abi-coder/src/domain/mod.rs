//! # Domain Layer
//!
//! Type parsing, ABI fragments and the two parameter coding styles.

pub mod abi;
pub mod config;
pub mod errors;
pub mod params;
pub mod rewrite;
pub mod types;
pub mod v2;
