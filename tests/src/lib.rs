//! # TronKit Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/            # criterion benchmarks
//! └── src/integration/
//!     ├── flows.rs        # cross-crate flows through the facade
//!     └── properties.rs   # proptest invariants
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tk-tests
//! cargo test -p tk-tests integration::properties::
//! cargo bench -p tk-tests
//! ```

pub mod integration;
