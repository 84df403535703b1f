//! Rule descriptors and the grammar rule table.
//!
//! Rules refer to one another by [`SymbolKind`] rather than by value, so
//! mutually recursive rules can be written in any order: a reference is just
//! an index into the table, resolved when the [`Grammar`] is built. Each rule
//! pairs a [`Recognizer`] with an optional [`Handler`] chosen at construction
//! time.
//!
//! ```rust
//! # use parcomb::{Grammar, Recognizer, SymbolKind, Symbol, ParseOutcome};
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum K { Digit, Plus, Sum }
//! impl From<K> for usize { fn from(k: K) -> usize { k as usize } }
//! impl SymbolKind for K {
//!     const COUNT: usize = 3;
//!     const ALL: &'static [K] = &[K::Digit, K::Plus, K::Sum];
//!     fn name(self) -> &'static str { ["digit", "plus", "sum"][self as usize] }
//! }
//!
//! // sum := digit plus sum | digit
//! let grammar = Grammar::<K, i64, String>::builder()
//!     .terminal(K::Digit, |c| c.is_ascii_digit())
//!     .terminal(K::Plus, |c| c == '+')
//!     .rule(K::Sum, Recognizer::Alt(vec![
//!         Recognizer::Seq(vec![K::Digit, K::Plus, K::Sum]),
//!         Recognizer::Rule(K::Digit),
//!     ]))
//!     .handler(K::Digit, |s: &Symbol<K, i64>| Ok(s.terminal_char().unwrap() as i64 - '0' as i64))
//!     .handler(K::Sum, |s: &Symbol<K, i64>| Ok(s.children().iter().filter_map(|c| c.result()).sum()))
//!     .build(K::Sum)
//!     .unwrap();
//!
//! let ParseOutcome::Matched(sym, rest) = grammar.parse("1+2+3").unwrap() else { panic!() };
//! assert_eq!(sym.result(), Some(&6));
//! assert!(rest.is_empty());
//! ```

use crate::{GrammarError, Limits, ParseError, ParseOutcome, Parser, Symbol, SymbolKind};

/// Semantic action computing a symbol's value from its matched content.
///
/// For non-terminals the children have already been evaluated, so their
/// [`result`](Symbol::result)s are available.
pub type Handler<K, V, E> = fn(&Symbol<K, V>) -> Result<V, E>;

/// How a rule recognizes input.
#[derive(Debug, Clone)]
pub enum Recognizer<K> {
    /// One character satisfying the predicate. Only valid for terminals.
    Char(fn(char) -> bool),
    /// Delegates to another rule; the match has that rule's symbol as its
    /// only child.
    Rule(K),
    /// Every rule in order, each starting where the previous one stopped.
    /// All or nothing.
    Seq(Vec<K>),
    /// The first alternative that matches at the current position.
    Alt(Vec<Recognizer<K>>),
}

impl<K: SymbolKind> Recognizer<K> {
    fn contains_char(&self) -> bool {
        match self {
            Recognizer::Char(_) => true,
            Recognizer::Rule(_) | Recognizer::Seq(_) => false,
            Recognizer::Alt(alts) => alts.iter().any(Recognizer::contains_char),
        }
    }

    fn has_empty(&self) -> bool {
        match self {
            Recognizer::Char(_) | Recognizer::Rule(_) => false,
            Recognizer::Seq(seq) => seq.is_empty(),
            Recognizer::Alt(alts) => alts.is_empty() || alts.iter().any(Recognizer::has_empty),
        }
    }
}

/// A rule descriptor: a recognizer paired with its semantic handler.
#[derive(Debug, Clone)]
pub struct Rule<K, V, E> {
    pub kind: K,
    pub terminal: bool,
    pub recognizer: Recognizer<K>,
    pub handler: Option<Handler<K, V, E>>,
}

/// Collects rules before they are validated into a [`Grammar`].
pub struct GrammarBuilder<K, V, E> {
    rules: Vec<Option<Rule<K, V, E>>>,
    handlers: Vec<(K, Handler<K, V, E>)>,
    errors: Vec<GrammarError>,
}

impl<K, V, E> GrammarBuilder<K, V, E>
where
    K: SymbolKind,
{
    fn new() -> Self {
        Self {
            rules: (0..K::COUNT).map(|_| None).collect(),
            handlers: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn insert(mut self, kind: K, terminal: bool, recognizer: Recognizer<K>) -> Self {
        let Some(slot) = self.rules.get_mut(kind.index()) else {
            self.errors.push(GrammarError::Other(
                format!("{} has index {} >= {}", kind.name(), kind.index(), K::COUNT).into(),
            ));
            return self;
        };
        if slot.is_some() {
            self.errors.push(GrammarError::Duplicate(kind.name()));
            return self;
        }
        *slot = Some(Rule {
            kind,
            terminal,
            recognizer,
            handler: None,
        });
        self
    }

    /// Defines a single-character terminal rule.
    pub fn terminal(self, kind: K, pred: fn(char) -> bool) -> Self {
        self.insert(kind, true, Recognizer::Char(pred))
    }

    /// Defines a non-terminal rule. `recognizer` may refer to rules that are
    /// defined later.
    pub fn rule(self, kind: K, recognizer: Recognizer<K>) -> Self {
        self.insert(kind, false, recognizer)
    }

    /// Attaches the semantic handler for `kind`.
    pub fn handler(mut self, kind: K, handler: Handler<K, V, E>) -> Self {
        self.handlers.push((kind, handler));
        self
    }

    /// Validates the table and produces a grammar starting at `start`.
    ///
    /// Every kind in [`SymbolKind::ALL`] must have exactly one rule.
    pub fn build(self, start: K) -> Result<Grammar<K, V, E>, GrammarError> {
        let Self {
            rules,
            handlers,
            errors,
        } = self;
        if let Some(err) = errors.into_iter().next() {
            return Err(err);
        }
        if K::ALL.len() != K::COUNT {
            return Err(GrammarError::Other(
                format!("{} kinds listed, {} declared", K::ALL.len(), K::COUNT).into(),
            ));
        }

        let mut table = Vec::with_capacity(K::COUNT);
        for (index, slot) in rules.into_iter().enumerate() {
            let kind = K::ALL[index];
            if kind.index() != index {
                return Err(GrammarError::Other(
                    format!("{} listed at position {index}", kind.name()).into(),
                ));
            }
            let rule = slot.ok_or(GrammarError::Missing(kind.name()))?;
            match (&rule.recognizer, rule.terminal) {
                (Recognizer::Char(_), true) => {}
                (_, true) => return Err(GrammarError::TerminalShape(kind.name())),
                (r, false) if r.contains_char() => {
                    return Err(GrammarError::RuleShape(kind.name()));
                }
                _ => {}
            }
            if rule.recognizer.has_empty() {
                return Err(GrammarError::Empty(kind.name()));
            }
            table.push(rule);
        }

        for (kind, handler) in handlers {
            let Some(rule) = table.get_mut(kind.index()) else {
                return Err(GrammarError::Missing(kind.name()));
            };
            if rule.handler.is_some() {
                return Err(GrammarError::Other(
                    format!("{} has more than one handler", kind.name()).into(),
                ));
            }
            rule.handler = Some(handler);
        }

        log::debug!(
            "grammar built: {} rules, start {}",
            table.len(),
            start.name()
        );
        Ok(Grammar { rules: table, start })
    }
}

/// A validated rule table.
#[derive(Debug, Clone)]
pub struct Grammar<K, V, E> {
    rules: Vec<Rule<K, V, E>>,
    start: K,
}

impl<K, V, E> Grammar<K, V, E>
where
    K: SymbolKind,
{
    pub fn builder() -> GrammarBuilder<K, V, E> {
        GrammarBuilder::new()
    }

    #[inline]
    pub fn start(&self) -> K {
        self.start
    }

    #[inline]
    pub fn rule(&self, kind: K) -> &Rule<K, V, E> {
        &self.rules[kind.index()]
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule<K, V, E>> {
        self.rules.iter()
    }

    /// Creates a parser over this grammar with the given limits.
    pub fn parser(&self, limits: Limits) -> Parser<'_, K, V, E> {
        Parser::new(self, limits)
    }

    /// Matches the start rule at the beginning of `input` with default
    /// limits. Trailing input is left in the returned outcome.
    pub fn parse<'a>(&self, input: &'a str) -> Result<ParseOutcome<'a, K, V>, ParseError<E>> {
        self.parser(Limits::default()).parse(self.start, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::tests::Kind;

    fn digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    fn plus(c: char) -> bool {
        c == '+'
    }

    fn sum_rule() -> Recognizer<Kind> {
        Recognizer::Alt(vec![
            Recognizer::Seq(vec![Kind::Digit, Kind::Plus, Kind::Sum]),
            Recognizer::Rule(Kind::Digit),
        ])
    }

    #[test]
    fn builds_with_forward_references() {
        // `sum` is defined before the terminals it refers to.
        let grammar = Grammar::<Kind, i64, ()>::builder()
            .rule(Kind::Sum, sum_rule())
            .terminal(Kind::Digit, digit)
            .terminal(Kind::Plus, plus)
            .build(Kind::Sum)
            .unwrap();
        assert_eq!(grammar.start(), Kind::Sum);
        assert!(grammar.rule(Kind::Digit).terminal);
        assert!(!grammar.rule(Kind::Sum).terminal);
        assert_eq!(grammar.rules().count(), 3);
    }

    #[test]
    fn missing_rule_is_rejected() {
        let err = Grammar::<Kind, i64, ()>::builder()
            .rule(Kind::Sum, sum_rule())
            .terminal(Kind::Digit, digit)
            .build(Kind::Sum)
            .unwrap_err();
        assert_eq!(err, GrammarError::Missing("plus"));
    }

    #[test]
    fn duplicate_rule_is_rejected() {
        let err = Grammar::<Kind, i64, ()>::builder()
            .terminal(Kind::Digit, digit)
            .terminal(Kind::Digit, digit)
            .terminal(Kind::Plus, plus)
            .rule(Kind::Sum, sum_rule())
            .build(Kind::Sum)
            .unwrap_err();
        assert_eq!(err, GrammarError::Duplicate("digit"));
    }

    #[test]
    fn bare_char_in_rule_is_rejected() {
        let err = Grammar::<Kind, i64, ()>::builder()
            .terminal(Kind::Digit, digit)
            .terminal(Kind::Plus, plus)
            .rule(
                Kind::Sum,
                Recognizer::Alt(vec![Recognizer::Rule(Kind::Digit), Recognizer::Char(plus)]),
            )
            .build(Kind::Sum)
            .unwrap_err();
        assert_eq!(err, GrammarError::RuleShape("sum"));
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = Grammar::<Kind, i64, ()>::builder()
            .terminal(Kind::Digit, digit)
            .terminal(Kind::Plus, plus)
            .rule(Kind::Sum, Recognizer::Alt(vec![Recognizer::Seq(vec![])]))
            .build(Kind::Sum)
            .unwrap_err();
        assert_eq!(err, GrammarError::Empty("sum"));
    }

    #[test]
    fn second_handler_is_rejected() {
        let err = Grammar::<Kind, i64, ()>::builder()
            .terminal(Kind::Digit, digit)
            .terminal(Kind::Plus, plus)
            .rule(Kind::Sum, sum_rule())
            .handler(Kind::Digit, |_| Ok(0))
            .handler(Kind::Digit, |_| Ok(1))
            .build(Kind::Sum)
            .unwrap_err();
        assert!(matches!(err, GrammarError::Other(_)));
    }
}
