//! # Parse-Tree Rendering
//!
//! [`TreeDisplay`] prints a symbol and its descendants as an indented tree,
//! one symbol per line. Terminal symbols show the character they matched in
//! quotes (green when color is enabled); evaluated non-terminals show their
//! value.
//!
//! ```rust
//! # use parcomb_calc::{parse, Config, TreeDisplay};
//! let eval = parse("{1}", &Config::default()).unwrap();
//! let text = TreeDisplay::new(&eval.tree).to_string();
//! assert_eq!(text.lines().next(), Some("│ expression: 1"));
//! assert!(text.contains("left_brace: \"{\""));
//! ```

use parcomb::{Symbol, SymbolKind};
use std::fmt;

const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Renders a [`Symbol`] tree.
pub struct TreeDisplay<'a, K, V> {
    root: &'a Symbol<K, V>,
    color: bool,
}

impl<'a, K, V> TreeDisplay<'a, K, V> {
    pub fn new(root: &'a Symbol<K, V>) -> Self {
        Self { root, color: false }
    }

    /// Highlight terminal characters with ANSI color codes.
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

impl<K, V> fmt::Display for TreeDisplay<'_, K, V>
where
    K: SymbolKind,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, sym) in self.root.walk() {
            if depth > 0 {
                write!(f, "{}└── ", "    ".repeat(depth - 1))?;
            }
            let name = sym.kind().name();
            match sym.terminal_char() {
                Some(c) if self.color => writeln!(f, "{name}: {GREEN}\"{c}\"{RESET}")?,
                Some(c) => writeln!(f, "{name}: \"{c}\"")?,
                None => match sym.result() {
                    Some(value) => writeln!(f, "│ {name}: {value}")?,
                    None => writeln!(f, "│ {name}:")?,
                },
            }
        }
        Ok(())
    }
}
