//! Shared test fixtures for the dish distribution crates.
//!
//! - [`fixtures`] - Hand-written and seeded random preference sets
//! - [`reference`] - A deliberately naive ranking to check the solver against
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! dishes-test = { workspace = true }
//! ```

pub mod fixtures;
pub mod reference;

pub use fixtures::{alice_bob, generated, lunch_party};
pub use reference::rank_all;
