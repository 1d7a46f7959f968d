//! Shared test utilities for the vendor-registry workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`vendor`]: [`TestVendor`](vendor::TestVendor), a temporary storage
//!   root with materialized packages

pub mod vendor;

pub use vendor::TestVendor;
