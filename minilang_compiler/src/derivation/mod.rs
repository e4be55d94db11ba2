//! Leftmost derivation recording
//!
//! The parser reports each production it chooses to a [`DerivationRecorder`],
//! which keeps the current sentential form and the rendered history.

pub mod recorder;

pub use recorder::{DerivationError, DerivationLog, DerivationRecorder, DerivationStep};
