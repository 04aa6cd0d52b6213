//! # Rule Generation
//!
//! Generators that derive new rules from the units found in a directory.

mod image_chain;

pub use image_chain::*;
