//! Type definitions module.
//!
//! Contains shared types used across the crate.

pub mod chain;
pub mod state;

pub use chain::*;
pub use state::*;
