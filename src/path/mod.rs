mod expander;
pub mod wildcard;

pub use expander::{normalize, PathExpander};
