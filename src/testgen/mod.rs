pub mod classify;
pub mod fixtures;
pub mod runner;
pub mod stats;
