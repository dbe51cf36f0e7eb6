//! Common test utilities for pltx.
//!
//! Shared assertions and sample data for the integration tests.

pub mod assertions;
pub mod test_data;
