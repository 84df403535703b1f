//! Command-line interface (CLI) for parcomb-calc.
//!
//! Evaluates calculator expressions given on the command line or read from a
//! file (one expression per line), or prints the parse tree of a single
//! expression.

use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser as ClapParser, Subcommand};
use parcomb::Limits;
use parcomb_calc::{Config, TreeDisplay, parse};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(ClapArgs, Debug)]
struct EvalOpts {
    /// Reject input with unconsumed trailing characters
    #[arg(short, long)]
    strict: bool,
    /// Longest accepted expression, in bytes
    #[arg(long, default_value_t = Config::DEFAULT_MAX_INPUT_LEN)]
    max_len: usize,
    /// Deepest accepted rule nesting
    #[arg(long, default_value_t = Limits::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Most rule attempts spent on one expression
    #[arg(long, default_value_t = Limits::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,
}

impl From<&EvalOpts> for Config {
    fn from(limits: &EvalOpts) -> Self {
        Config {
            strict: limits.strict,
            max_input_len: limits.max_len,
            max_depth: limits.max_depth,
            max_attempts: limits.max_attempts,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluates expressions
    Eval {
        /// Expressions to evaluate
        exprs: Vec<String>,
        /// Input file with one expression per line
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        limits: EvalOpts,
    },
    /// Prints the parse tree of an expression
    Tree {
        /// Expression to parse
        expr: String,
        /// Highlight terminal symbols
        #[arg(short, long)]
        color: bool,
        #[command(flatten)]
        limits: EvalOpts,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Eval {
            exprs,
            input,
            limits,
        } => {
            let config = Config::from(&limits);
            let mut lines = exprs;
            if let Some(path) = input {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("can't open {:?}", path))?;
                lines.extend(
                    text.lines()
                        .map(str::trim_end)
                        .filter(|l| !l.is_empty())
                        .map(str::to_owned),
                );
            }
            if lines.is_empty() {
                bail!("no expressions given");
            }

            let mut failed = 0;
            for line in &lines {
                match parse(line, &config) {
                    Ok(eval) => {
                        println!("{} = {}", line, eval.value);
                        if !eval.is_complete() {
                            log::warn!("{:?}: ignored {:?}", line, eval.remaining());
                        }
                        log::info!("Stats: {:?}", eval.stats);
                    }
                    Err(e) => {
                        eprintln!("{}: {}", line, e);
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                bail!("{} of {} expression(s) failed", failed, lines.len());
            }
        }
        Commands::Tree {
            expr,
            color,
            limits,
        } => {
            let eval = parse(&expr, &Config::from(&limits))?;
            print!("{}", TreeDisplay::new(&eval.tree).color(color));
            if !eval.is_complete() {
                println!("(unconsumed: {:?})", eval.remaining());
            }
            log::info!(
                "{} symbols, height {}",
                eval.tree.size(),
                eval.tree.height()
            );
            log::info!("Stats: {:?}", eval.stats);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn eval_defaults_match_library_config() {
        let args = Args::try_parse_from(["parcomb-calc", "eval", "1+2", "{3}"]).unwrap();
        let Commands::Eval {
            exprs,
            input,
            limits,
        } = args.command
        else {
            panic!("expected eval");
        };
        assert_eq!(exprs, vec!["1+2".to_string(), "{3}".to_string()]);
        assert!(input.is_none());
        assert_eq!(Config::from(&limits), Config::default());
    }

    #[test]
    fn tree_accepts_limit_flags() {
        let args = Args::try_parse_from([
            "parcomb-calc",
            "tree",
            "-c",
            "--strict",
            "--max-depth",
            "16",
            "--max-attempts",
            "99",
            "{1}",
        ])
        .unwrap();
        let Commands::Tree {
            expr,
            color,
            limits,
        } = args.command
        else {
            panic!("expected tree");
        };
        assert_eq!(expr, "{1}");
        assert!(color);
        let config = Config::from(&limits);
        assert!(config.strict);
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.max_attempts, 99);
        assert_eq!(config.max_input_len, Config::DEFAULT_MAX_INPUT_LEN);
    }
}
