//! Gild testing infrastructure
//!
//! Common builders and fixtures shared by the engine crates' tests, so
//! lifecycle scenarios don't re-implement party setup in every module.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! gild-testkit = { path = "../gild-testkit" }
//! ```
//!
//! ```rust
//! use gild_testkit::EscrowFixture;
//!
//! let mut fx = EscrowFixture::new();
//! let (job, cap) = fx.open_job(100);
//! // ... drive operations against fx.board, fx.client, fx.freelancer
//! # let _ = (job, cap);
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod builders;
pub mod fixtures;

pub use builders::{seeded_addresses, test_address, Party};
pub use fixtures::EscrowFixture;

/// Install a fmt subscriber for test runs, honoring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
