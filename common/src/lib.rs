//! fxpulse Common Types
//!
//! Shared types used across the fxpulse feed, including identifiers,
//! monetary types, and timing constants.

pub mod identifiers;
pub mod monetary;
pub mod time;

pub use identifiers::*;
pub use monetary::*;
pub use time::*;
