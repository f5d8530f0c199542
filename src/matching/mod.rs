pub mod experience;
pub mod industry;
pub mod language;
pub mod schedule;
pub mod scoring;
pub mod skills;
pub mod timezone;
pub mod weights;

pub use scoring::{compute_match, MatchOutcome};
pub use weights::Weights;
