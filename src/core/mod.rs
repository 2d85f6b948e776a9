//! Core data types: logical time, version records and key histories

pub mod history;
pub mod temporal;
pub mod version;

pub use history::*;
pub use temporal::*;
pub use version::*;
