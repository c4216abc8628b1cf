//! Command line parser.
//!
//! A line is split on whitespace; the first token picks the verb
//! (case-insensitively) and the rest are positional arguments.

use super::ast::Command;
use super::error::{ParseError, ParseResult};

/// Protocol parser for nestkv.
pub struct Parser;

impl Parser {
    /// Parse one input line.
    ///
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> ParseResult<Option<Command>> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();

        let command = match verb.to_uppercase().as_str() {
            "SET" => {
                let [key, value] = Self::args::<2>("SET", &args)?;
                Command::Set { key, value }
            }
            "GET" => {
                let [key] = Self::args::<1>("GET", &args)?;
                Command::Get { key }
            }
            "UNSET" => {
                let [key] = Self::args::<1>("UNSET", &args)?;
                Command::Unset { key }
            }
            "COUNTS" => {
                let [value] = Self::args::<1>("COUNTS", &args)?;
                Command::Counts { value }
            }
            "FIND" => {
                let [value] = Self::args::<1>("FIND", &args)?;
                Command::Find { value }
            }
            "BEGIN" => {
                Self::args::<0>("BEGIN", &args)?;
                Command::Begin
            }
            "ROLLBACK" => {
                Self::args::<0>("ROLLBACK", &args)?;
                Command::Rollback
            }
            "COMMIT" => {
                Self::args::<0>("COMMIT", &args)?;
                Command::Commit
            }
            "END" => {
                Self::args::<0>("END", &args)?;
                Command::End
            }
            _ => {
                return Err(ParseError::UnknownCommand {
                    verb: verb.to_string(),
                })
            }
        };

        Ok(Some(command))
    }

    fn args<const N: usize>(verb: &'static str, args: &[&str]) -> ParseResult<[String; N]> {
        if args.len() != N {
            return Err(ParseError::WrongArity {
                verb,
                expected: N,
                found: args.len(),
            });
        }
        Ok(std::array::from_fn(|i| args[i].to_string()))
    }
}
