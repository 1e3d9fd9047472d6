//! Fixed simulation constants.

pub mod constants;

pub use constants::*;
