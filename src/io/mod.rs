//! Output formats for simulation summaries.

pub mod export;
