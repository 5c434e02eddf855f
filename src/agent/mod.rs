//! Command-to-action pipeline: intent parsing, deterministic heuristics,
//! optional model augmentation, and the validated tool vocabulary.

pub mod augment;
pub mod colors;
pub mod events;
pub mod heuristics;
pub mod intent;
pub mod tools;
