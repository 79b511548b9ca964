#![allow(nonstandard_style)]

pub mod commanding;
pub mod config;
pub mod error_handling;
pub mod evaluating;
pub mod memory;
pub mod operating;
pub mod parsing;
pub mod scanning;
pub mod stack;

pub use commanding::{Outcome, Session};
pub use error_handling::{CalcError, Result};
pub use evaluating::{evaluate, evaluate_expression};
pub use memory::{Environment, Variables};
pub use operating::{Operator, Value};
pub use parsing::{parse, Expression};
