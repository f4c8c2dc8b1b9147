#![warn(clippy::print_stdout, clippy::unimplemented, clippy::doc_markdown)]

//! Compile-time checking for Java expression trees.
//!
//! [`Expr`] models the expressions of a small subset of Java. Each
//! expression answers [`Expr::static_type`], the type it would have at
//! runtime, and [`Expr::check_types`], whether its own call structure is
//! sound. Both run against a [`TypeSystem`] holding the known class
//! definitions, and neither evaluates anything.

pub mod checker;
pub mod expr;

pub use crate::expr::Expr;
pub use type_system::{Type, TypeError, TypeSystem};
