//! Operations that coordinate stores, views and the lesson index.
//!
//! # Responsibility
//! - Merge partial edits and run conflict checks before mutating.
//! - Apply batch level progression.
//! - Expose a single `ModelManager` facade to the command layer.

pub mod edit;
pub mod level_policy;
pub mod model_manager;
