//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that callers use

pub mod inbound;
