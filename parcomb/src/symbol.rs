//! Parse-tree nodes.
//!
//! A [`Symbol`] is produced for every successful rule match. Terminal symbols
//! hold the single character they matched; non-terminal symbols own their
//! children in production order. The semantic result slot is written once by
//! the engine, right after the rule's handler runs, and is read-only from
//! then on.

use crate::Span;
use std::fmt::Debug;

/// Identifies the grammar rule that produced a [`Symbol`].
///
/// Implementors are usually fieldless enums. `Into<usize>` must map every
/// kind to a distinct index in `0..COUNT`; the grammar rule table is indexed
/// by it.
pub trait SymbolKind: Copy + Debug + Eq + Into<usize> + 'static {
    /// Number of kinds.
    const COUNT: usize;

    /// Every kind, in index order.
    const ALL: &'static [Self];

    /// Human-readable rule name used in traces and tree rendering.
    fn name(self) -> &'static str;

    #[inline]
    fn index(self) -> usize {
        self.into()
    }
}

/// What a symbol matched: one character for terminals, an ordered list of
/// child symbols for non-terminals.
#[derive(Debug, Clone, PartialEq)]
pub enum Matched<K, V> {
    Terminal(char),
    Sequence(Vec<Symbol<K, V>>),
}

/// A parse-tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol<K, V> {
    kind: K,
    matched: Matched<K, V>,
    span: Span,
    result: Option<V>,
}

impl<K, V> Symbol<K, V>
where
    K: SymbolKind,
{
    pub(crate) fn new(kind: K, matched: Matched<K, V>, span: Span) -> Self {
        Self {
            kind,
            matched,
            span,
            result: None,
        }
    }

    /// Stores the semantic value. Only the engine calls this, once per
    /// symbol, immediately after the rule handler returns.
    pub(crate) fn set_result(&mut self, value: V) {
        debug_assert!(self.result.is_none(), "result of {:?} set twice", self.kind);
        self.result = Some(value);
    }

    #[inline]
    pub fn kind(&self) -> K {
        self.kind
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.matched, Matched::Terminal(_))
    }

    #[inline]
    pub fn matched(&self) -> &Matched<K, V> {
        &self.matched
    }

    /// Byte range of the input this symbol was matched from.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// The semantic value, or `None` if the rule has no handler.
    #[inline]
    pub fn result(&self) -> Option<&V> {
        self.result.as_ref()
    }

    /// The matched character of a terminal symbol.
    pub fn terminal_char(&self) -> Option<char> {
        match self.matched {
            Matched::Terminal(c) => Some(c),
            Matched::Sequence(_) => None,
        }
    }

    /// Child symbols in production order; empty for terminals.
    pub fn children(&self) -> &[Symbol<K, V>] {
        match &self.matched {
            Matched::Terminal(_) => &[],
            Matched::Sequence(children) => children,
        }
    }

    /// Returns the `index`-th child, if present.
    pub fn child(&self, index: usize) -> Option<&Symbol<K, V>> {
        self.children().get(index)
    }

    /// Depth-first, pre-order traversal of the tree rooted here.
    /// Yields each symbol with its depth (the root is at depth 0).
    pub fn walk(&self) -> Walk<'_, K, V> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    /// Total number of symbols in the tree rooted here.
    pub fn size(&self) -> usize {
        self.walk().count()
    }

    /// Length of the longest root-to-leaf path (a lone terminal has height 1).
    pub fn height(&self) -> usize {
        self.walk().map(|(depth, _)| depth + 1).max().unwrap_or(1)
    }
}

/// Iterator returned by [`Symbol::walk`].
pub struct Walk<'a, K, V> {
    stack: Vec<(usize, &'a Symbol<K, V>)>,
}

impl<'a, K, V> Iterator for Walk<'a, K, V>
where
    K: SymbolKind,
{
    type Item = (usize, &'a Symbol<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, sym) = self.stack.pop()?;
        self.stack
            .extend(sym.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, sym))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum Kind {
        Digit,
        Plus,
        Sum,
    }

    impl From<Kind> for usize {
        fn from(k: Kind) -> usize {
            k as usize
        }
    }

    impl SymbolKind for Kind {
        const COUNT: usize = 3;
        const ALL: &'static [Self] = &[Kind::Digit, Kind::Plus, Kind::Sum];

        fn name(self) -> &'static str {
            match self {
                Kind::Digit => "digit",
                Kind::Plus => "plus",
                Kind::Sum => "sum",
            }
        }
    }

    fn leaf(kind: Kind, c: char, at: usize) -> Symbol<Kind, i64> {
        Symbol::new(kind, Matched::Terminal(c), Span::new(at, at + 1))
    }

    fn sample() -> Symbol<Kind, i64> {
        // 1+2
        let children = vec![
            leaf(Kind::Digit, '1', 0),
            leaf(Kind::Plus, '+', 1),
            leaf(Kind::Digit, '2', 2),
        ];
        Symbol::new(Kind::Sum, Matched::Sequence(children), Span::new(0, 3))
    }

    #[test]
    fn terminal_has_no_children() {
        let sym = leaf(Kind::Digit, '7', 0);
        assert!(sym.is_terminal());
        assert_eq!(sym.terminal_char(), Some('7'));
        assert!(sym.children().is_empty());
        assert!(sym.result().is_none());
    }

    #[test]
    fn sequence_children_in_order() {
        let sym = sample();
        assert!(!sym.is_terminal());
        assert_eq!(sym.terminal_char(), None);
        let chars: Vec<_> = sym.children().iter().filter_map(|c| c.terminal_char()).collect();
        assert_eq!(chars, vec!['1', '+', '2']);
        assert_eq!(sym.child(1).map(|c| c.kind()), Some(Kind::Plus));
        assert!(sym.child(3).is_none());
    }

    #[test]
    fn walk_is_preorder_with_depths() {
        let sym = sample();
        let visited: Vec<_> = sym.walk().map(|(d, s)| (d, s.kind())).collect();
        assert_eq!(
            visited,
            vec![
                (0, Kind::Sum),
                (1, Kind::Digit),
                (1, Kind::Plus),
                (1, Kind::Digit)
            ]
        );
        assert_eq!(sym.size(), 4);
        assert_eq!(sym.height(), 2);
    }

    #[test]
    fn result_is_stored_once() {
        let mut sym = leaf(Kind::Digit, '4', 0);
        sym.set_result(4);
        assert_eq!(sym.result(), Some(&4));
    }

    #[test]
    #[should_panic(expected = "set twice")]
    #[cfg(debug_assertions)]
    fn result_set_twice_panics_in_debug() {
        let mut sym = leaf(Kind::Digit, '4', 0);
        sym.set_result(4);
        sym.set_result(5);
    }
}
