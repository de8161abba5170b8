#![forbid(unsafe_code)]
#![doc = "Common types, error codes and parameters for the tally encrypted-counter workspace."]

pub mod algorithm;
pub mod error;

pub use algorithm::*;
pub use error::*;
