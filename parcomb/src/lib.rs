//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Recursive-descent parser combinators with attached semantic evaluation.
//!
//! A grammar is a table of [`Rule`]s indexed by a user-defined
//! [`SymbolKind`]. Terminal rules recognize one character; non-terminal rules
//! compose other rules by sequence and ordered alternation. Each rule may
//! carry a [`Handler`] that computes the value of the [`Symbol`] it produced,
//! so evaluation happens bottom-up while the input is being recognized.
//!
//! Key components:
//! - `cursor`: the [`Input`] suffix view and byte [`Span`]s
//! - `symbol`: parse-tree nodes and the [`SymbolKind`] trait
//! - `grammar`: [`Recognizer`], [`Rule`] and the validated [`Grammar`] table
//! - `parser`: the [`Parser`] engine, [`ParseOutcome`], [`Limits`] and [`ParseStats`]
//! - `error`: [`ParseError`] and [`GrammarError`]

mod cursor;
mod error;
mod grammar;
mod parser;
mod symbol;

pub use crate::cursor::{Input, Span};
pub use crate::error::{GrammarError, ParseError};
pub use crate::grammar::{Grammar, GrammarBuilder, Handler, Recognizer, Rule};
pub use crate::parser::{Limits, ParseOutcome, ParseStats, Parser};
pub use crate::symbol::{Matched, Symbol, SymbolKind, Walk};
