//! Output formatting beyond the canonical text form

pub mod latex;

pub use latex::LatexFormatter;
