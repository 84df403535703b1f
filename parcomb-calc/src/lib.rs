//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! # parcomb-calc
//!
//! A small calculator built on **parcomb**: a hand-written grammar over
//! single digits, braces and `+ - * /`, recognized by recursive descent and
//! evaluated bottom-up by the handler attached to each rule.
//!
//! ## Overview
//!
//! - [`grammar`]: the rule table ([`CalcKind`]) and semantic handlers,
//! - [`calc`](mod@calc): the top-level entry points [`calc()`],
//!   [`calc_strict`] and [`parse`], and their [`Config`],
//! - [`number`]: integer/real values with checked arithmetic,
//! - [`tree`]: parse-tree rendering,
//! - [`error`]: the [`CalcError`] type.
//!
//! ## Example
//!
//! ```rust
//! use parcomb_calc::{calc, Number};
//!
//! // `+`/`-` group tighter than `*`/`/`, and both group to the right.
//! assert_eq!(calc("2*3+4").unwrap(), Number::Int(14));
//! assert_eq!(calc("9-4-2").unwrap(), Number::Int(7));
//!
//! let Number::Real(x) = calc("{2*4}+5*6-7/{1+2}").unwrap() else { panic!() };
//! assert!((x + 13.0 / 3.0).abs() < 1e-12);
//! ```
pub mod calc;
pub mod error;
pub mod grammar;
pub mod number;
pub mod tree;

pub use calc::{Config, Evaluation, calc, calc_strict, parse};
pub use error::CalcError;
pub use grammar::{CalcGrammar, CalcKind, CalcSymbol, calc_grammar};
pub use number::{ArithmeticFailure, Number};
pub use tree::TreeDisplay;
