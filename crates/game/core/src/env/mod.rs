//! Inputs the rules consume but do not own.
//!
//! Currently this is only the random source handed to the generator.
mod rng;

pub use rng::{PcgRng, RngSource, mix_seed};
