//! Contracted Gaussian basis shells.

pub mod ao;
