//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that callers use
//! - **Outbound (Driven)**: the external ABI word coder

pub mod inbound;
pub mod outbound;
