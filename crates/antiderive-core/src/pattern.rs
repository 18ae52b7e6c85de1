//! Structural substitution and rewriting

pub mod substitution;

pub use substitution::{replace_trig_functions, Substitutable};
