//! The recursive-descent engine.
//!
//! [`Parser`] walks a [`Grammar`] top-down. A rule attempt either fails with
//! [`ParseOutcome::NoMatch`], leaving nothing behind, or builds a [`Symbol`]
//! whose children were already matched and evaluated, runs the rule's handler
//! on it exactly once, and hands it back with the remaining input. Handler
//! failures and limit violations abort the parse as a [`ParseError`].

use crate::grammar::{Grammar, Recognizer};
use crate::{Input, Matched, ParseError, Symbol, SymbolKind};

/// Result of matching one rule at one position.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<'a, K, V> {
    /// The symbol and the input left after it.
    Matched(Symbol<K, V>, Input<'a>),
    NoMatch,
}

impl<'a, K, V> ParseOutcome<'a, K, V> {
    /// Converts into `Some((symbol, rest))` on a match.
    pub fn into_match(self) -> Option<(Symbol<K, V>, Input<'a>)> {
        match self {
            ParseOutcome::Matched(sym, rest) => Some((sym, rest)),
            ParseOutcome::NoMatch => None,
        }
    }
}

/// Bounds on a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of nested rule attempts. Each level costs up to five
    /// native stack frames; the default stays well inside a 2 MiB thread
    /// stack.
    pub max_depth: usize,
    /// Maximum number of rule attempts in one parse. Backtracking grammars
    /// can re-recognize the same text many times over, so this is what
    /// bounds running time.
    pub max_attempts: usize,
}

impl Limits {
    pub const DEFAULT_MAX_DEPTH: usize = 128;
    pub const DEFAULT_MAX_ATTEMPTS: usize = 250_000;
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Rule attempts, successful or not.
    pub attempts: usize,
    pub matches: usize,
    /// Alternatives abandoned in favor of the next one.
    pub backtracks: usize,
    pub handler_calls: usize,
    /// Deepest rule nesting reached.
    pub max_depth: usize,
}

type Recognized<'a, K, V> = Option<(Matched<K, V>, Input<'a>)>;

/// Runs rules of a [`Grammar`] against input.
pub struct Parser<'g, K, V, E> {
    grammar: &'g Grammar<K, V, E>,
    limits: Limits,
    depth: usize,
    stats: ParseStats,
}

impl<'g, K, V, E> Parser<'g, K, V, E>
where
    K: SymbolKind,
{
    pub fn new(grammar: &'g Grammar<K, V, E>, limits: Limits) -> Self {
        Self {
            grammar,
            limits,
            depth: 0,
            stats: ParseStats::default(),
        }
    }

    /// Statistics of the most recent parse.
    pub fn stats(&self) -> ParseStats {
        self.stats.clone()
    }

    /// Matches rule `kind` at the start of `input`.
    ///
    /// Does not require the whole input to be consumed; the unconsumed
    /// suffix is returned with the match.
    pub fn parse<'a>(
        &mut self,
        kind: K,
        input: &'a str,
    ) -> Result<ParseOutcome<'a, K, V>, ParseError<E>> {
        self.parse_at(kind, Input::new(input))
    }

    /// Matches rule `kind` at an arbitrary input position.
    pub fn parse_at<'a>(
        &mut self,
        kind: K,
        input: Input<'a>,
    ) -> Result<ParseOutcome<'a, K, V>, ParseError<E>> {
        self.depth = 0;
        self.stats = ParseStats::default();
        let outcome = self.apply(kind, input);
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{:?}", self.stats);
        }
        outcome
    }

    fn apply<'a>(
        &mut self,
        kind: K,
        input: Input<'a>,
    ) -> Result<ParseOutcome<'a, K, V>, ParseError<E>> {
        let grammar = self.grammar;
        let rule = grammar.rule(kind);

        if self.depth >= self.limits.max_depth {
            return Err(ParseError::DepthExceeded {
                limit: self.limits.max_depth,
                pos: input.pos(),
            });
        }
        if self.stats.attempts >= self.limits.max_attempts {
            return Err(ParseError::AttemptsExceeded {
                limit: self.limits.max_attempts,
                pos: input.pos(),
            });
        }
        self.depth += 1;
        self.stats.attempts += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.depth);
        log::trace!("Try {} at {}", kind.name(), input.pos());

        let recognized = self.recognize(&rule.recognizer, input);
        self.depth -= 1;

        let Some((matched, rest)) = recognized? else {
            log::trace!("NoMatch {} at {}", kind.name(), input.pos());
            return Ok(ParseOutcome::NoMatch);
        };
        // Sequences and alternations are never empty and every leaf is a
        // one-character terminal, so any match consumes input.
        debug_assert!(rest.pos() > input.pos(), "{} matched empty input", kind.name());

        let mut sym = Symbol::new(kind, matched, input.span_to(&rest));
        if let Some(handler) = rule.handler {
            self.stats.handler_calls += 1;
            let value = handler(&sym).map_err(ParseError::Handler)?;
            sym.set_result(value);
        }
        self.stats.matches += 1;
        log::trace!("Match {} {}", kind.name(), sym.span().display());
        Ok(ParseOutcome::Matched(sym, rest))
    }

    fn recognize<'a>(
        &mut self,
        recognizer: &Recognizer<K>,
        input: Input<'a>,
    ) -> Result<Recognized<'a, K, V>, ParseError<E>> {
        match recognizer {
            Recognizer::Char(pred) => Ok(match input.advance() {
                Some((c, rest)) if pred(c) => Some((Matched::Terminal(c), rest)),
                _ => None,
            }),
            Recognizer::Rule(kind) => Ok(self
                .apply(*kind, input)?
                .into_match()
                .map(|(sym, rest)| (Matched::Sequence(vec![sym]), rest))),
            Recognizer::Seq(kinds) => self.sequence(kinds, input),
            Recognizer::Alt(alts) => self.alternation(alts, input),
        }
    }

    /// All of `kinds` in order; on the first failure the symbols matched so
    /// far are dropped and the whole sequence fails.
    fn sequence<'a>(
        &mut self,
        kinds: &[K],
        input: Input<'a>,
    ) -> Result<Recognized<'a, K, V>, ParseError<E>> {
        let mut children = Vec::with_capacity(kinds.len());
        let mut rest = input;
        for &kind in kinds {
            match self.apply(kind, rest)? {
                ParseOutcome::Matched(sym, next) => {
                    children.push(sym);
                    rest = next;
                }
                ParseOutcome::NoMatch => return Ok(None),
            }
        }
        Ok(Some((Matched::Sequence(children), rest)))
    }

    /// The first alternative that matches at `input`.
    fn alternation<'a>(
        &mut self,
        alts: &[Recognizer<K>],
        input: Input<'a>,
    ) -> Result<Recognized<'a, K, V>, ParseError<E>> {
        for (i, alt) in alts.iter().enumerate() {
            if let Some(found) = self.recognize(alt, input)? {
                return Ok(Some(found));
            }
            if i + 1 < alts.len() {
                self.stats.backtracks += 1;
                log::trace!("Backtrack to alternative {} at {}", i + 1, input.pos());
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;
    use crate::symbol::tests::Kind;

    fn digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    fn plus(c: char) -> bool {
        c == '+'
    }

    fn eval_digit(sym: &Symbol<Kind, i64>) -> Result<i64, &'static str> {
        sym.terminal_char()
            .and_then(|c| c.to_digit(10))
            .map(i64::from)
            .ok_or("not a digit")
    }

    fn eval_sum(sym: &Symbol<Kind, i64>) -> Result<i64, &'static str> {
        match sym.children() {
            [d] => Ok(*d.result().ok_or("unevaluated")?),
            [d, _, s] => {
                let (a, b) = (d.result().ok_or("unevaluated")?, s.result().ok_or("unevaluated")?);
                if a + b > 20 {
                    Err("too big")
                } else {
                    Ok(a + b)
                }
            }
            _ => Err("bad shape"),
        }
    }

    // sum := digit plus sum | digit
    fn grammar() -> Grammar<Kind, i64, &'static str> {
        Grammar::builder()
            .terminal(Kind::Digit, digit)
            .terminal(Kind::Plus, plus)
            .rule(
                Kind::Sum,
                Recognizer::Alt(vec![
                    Recognizer::Seq(vec![Kind::Digit, Kind::Plus, Kind::Sum]),
                    Recognizer::Rule(Kind::Digit),
                ]),
            )
            .handler(Kind::Digit, eval_digit)
            .handler(Kind::Sum, eval_sum)
            .build(Kind::Sum)
            .unwrap()
    }

    #[test]
    fn terminal_consumes_exactly_one_char() {
        let _ = env_logger::builder().is_test(true).try_init();
        let g = grammar();
        let mut parser = g.parser(Limits::default());
        let (sym, rest) = parser.parse(Kind::Digit, "7+").unwrap().into_match().unwrap();
        assert_eq!(sym.terminal_char(), Some('7'));
        assert_eq!(sym.result(), Some(&7));
        assert_eq!(rest.remaining(), "+");
        assert_eq!(sym.span(), Span::new(0, 1));
    }

    #[test]
    fn terminal_fails_on_empty_and_mismatch() {
        let g = grammar();
        let mut parser = g.parser(Limits::default());
        assert_eq!(parser.parse(Kind::Digit, "").unwrap(), ParseOutcome::NoMatch);
        assert_eq!(parser.parse(Kind::Plus, "1").unwrap(), ParseOutcome::NoMatch);
    }

    #[test]
    fn sequence_builds_children_in_order() {
        let _ = env_logger::builder().is_test(true).try_init();
        let g = grammar();
        let (sym, rest) = g.parse("1+2").unwrap().into_match().unwrap();
        assert!(rest.is_empty());
        assert_eq!(sym.result(), Some(&3));
        let kinds: Vec<_> = sym.children().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![Kind::Digit, Kind::Plus, Kind::Sum]);
        // plus has no handler
        assert!(sym.child(1).unwrap().result().is_none());
        // single-alternative match wraps the delegated symbol
        let inner = sym.child(2).unwrap();
        assert_eq!(inner.children().len(), 1);
        assert_eq!(inner.span(), Span::new(2, 3));
    }

    #[test]
    fn failed_sequence_backtracks_to_next_alternative() {
        let g = grammar();
        let mut parser = g.parser(Limits::default());
        // `1+` fails the sequence at the missing right operand; the bare
        // digit alternative then matches and `+` is left over.
        let (sym, rest) = parser.parse(Kind::Sum, "1+").unwrap().into_match().unwrap();
        assert_eq!(sym.children().len(), 1);
        assert_eq!(sym.result(), Some(&1));
        assert_eq!(rest.remaining(), "+");
        assert!(parser.stats().backtracks >= 1);
    }

    #[test]
    fn no_match_at_start() {
        let g = grammar();
        assert_eq!(g.parse("+1").unwrap(), ParseOutcome::NoMatch);
        assert_eq!(g.parse("").unwrap(), ParseOutcome::NoMatch);
    }

    #[test]
    fn handler_error_aborts_parse() {
        let g = grammar();
        let err = g.parse("9+9+9").unwrap_err();
        assert_eq!(err, ParseError::Handler("too big"));
    }

    #[test]
    fn handler_runs_once_per_match() {
        let g = grammar();
        let mut parser = g.parser(Limits::default());
        let (sym, _) = parser.parse(Kind::Sum, "1+2+3").unwrap().into_match().unwrap();
        let stats = parser.stats();
        // every symbol in the final tree except the plus signs has a handler,
        // and no symbol that was later discarded was evaluated twice
        let evaluated = sym.walk().filter(|(_, s)| s.result().is_some()).count();
        assert!(stats.handler_calls >= evaluated);
        assert_eq!(sym.result(), Some(&6));
        assert!(stats.matches >= sym.size());
    }

    #[test]
    fn depth_limit_is_enforced() {
        let g = grammar();
        let mut parser = g.parser(Limits {
            max_depth: 4,
            ..Limits::default()
        });
        let err = parser.parse(Kind::Sum, "1+1+1+1+1").unwrap_err();
        assert!(matches!(err, ParseError::DepthExceeded { limit: 4, .. }));
        assert!(parser.stats().max_depth <= 4);
    }

    #[test]
    fn attempt_budget_is_enforced() {
        let g = grammar();
        let mut parser = g.parser(Limits {
            max_attempts: 5,
            ..Limits::default()
        });
        let err = parser.parse(Kind::Sum, "1+1+1").unwrap_err();
        assert!(matches!(err, ParseError::AttemptsExceeded { limit: 5, .. }));
        assert_eq!(parser.stats().attempts, 5);
        // the budget is per parse, not per parser
        assert!(parser.parse(Kind::Digit, "1").unwrap().into_match().is_some());
        assert_eq!(parser.stats().attempts, 1);
    }

    #[test]
    fn every_match_consumes_input() {
        let g = grammar();
        let start = Input::new("1+2+3x");
        let (sym, rest) = g
            .parser(Limits::default())
            .parse_at(Kind::Sum, start)
            .unwrap()
            .into_match()
            .unwrap();
        assert_eq!(rest.remaining(), "x");
        for (_, s) in sym.walk() {
            assert!(!s.span().is_empty(), "{:?} is empty", s.kind());
            if s.is_terminal() {
                assert_eq!(s.span().len(), 1);
            }
        }
    }
}
