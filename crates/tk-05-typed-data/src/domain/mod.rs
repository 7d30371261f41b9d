//! # Domain Layer

pub mod encoder;
pub mod entities;
pub mod errors;
pub mod separator;
