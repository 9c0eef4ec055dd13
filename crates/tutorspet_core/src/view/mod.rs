//! Derived views over canonical record collections.
//!
//! # Invariants
//! - Views are recomputed from the canonical snapshot on every update.
//! - The transformed view is always "filter, then stable sort".

pub mod projection;
