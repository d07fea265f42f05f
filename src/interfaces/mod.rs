//! Interfaces between `GtoGrid` and its users.

use anyhow;

pub mod cli;
pub mod input;

/// Trait for handling an input configuration.
pub trait InputHandle {
    /// Handles the input configuration and runs appropriate calculations.
    fn handle(&self) -> Result<(), anyhow::Error>;
}
