#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

//! Evaluator for animagus query ASTs.
//!
//! A query is a [`Value`](ast::Value) tree. The host supplies arguments,
//! parameters and cell queries through an
//! [`Environment`](environment::Environment), and the [`evaluator`] reduces
//! the tree to a result value or a typed [`ExecutionError`](evaluator::ExecutionError).

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod api;
pub mod ast;
pub mod classifier;
pub mod environment;
pub mod evaluator;
