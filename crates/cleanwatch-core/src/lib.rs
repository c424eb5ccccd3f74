//! Cleanwatch Core - Domain types shared by the cleanwatch crates.

mod error;
mod types;

pub use error::{Error, Result};
pub use types::*;
