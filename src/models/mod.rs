pub mod segment;
pub mod utterance;

pub use segment::*;
pub use utterance::*;
