//! Command language for driving a store from text

pub mod executor;
pub mod parser;

pub use executor::*;
pub use parser::*;
