//! Core types: numbers, symbols, constants, and the expression algebra

pub mod constants;
pub mod expression;
pub mod number;
pub mod symbol;

pub use constants::MathConstant;
pub use expression::{Expression, LogData, TrigData, TrigKind};
pub use number::Number;
pub use symbol::{symbols, Symbol};
