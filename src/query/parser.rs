//! Parser for the line-oriented command language
//!
//! ```text
//! SET <key> <value> <timestamp> [TTL <ttl>]
//! GET <key> <timestamp>
//! GET_AT <key> <timestamp>
//! DELETE <key> <timestamp>
//! HISTORY <key>
//! STATS
//! ```
//!
//! Keywords are case-insensitive. Keys and values are bare words or
//! double-quoted strings (`\"` and `\\` escapes). Blank lines and lines
//! starting with `#` are skipped.

use crate::core::temporal::{Timestamp, Ttl};
use crate::error::{Error, Result};
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag_no_case, take_while1};
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{all_consuming, map, map_res, opt, recognize, value};
use nom::error::ErrorKind;
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;

/// Parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set {
        key: String,
        value: String,
        timestamp: Timestamp,
        ttl: Option<Ttl>,
    },
    Get {
        key: String,
        timestamp: Timestamp,
    },
    GetAt {
        key: String,
        timestamp: Timestamp,
    },
    Delete {
        key: String,
        timestamp: Timestamp,
    },
    History {
        key: String,
    },
    Stats,
}

/// A command together with the 1-based line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub line: usize,
    pub command: Command,
}

/// Parse a single line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: usize, input: &str) -> Result<Option<Command>> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    match all_consuming(terminated(command, space0))(trimmed) {
        Ok((_, command)) => Ok(Some(command)),
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::Verify => {
            let word = e.input.split_whitespace().next().unwrap_or_default();
            Err(Error::parse(line, format!("unknown command `{}`", word)))
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let message = if e.input.is_empty() {
                format!("missing arguments in `{}`", trimmed)
            } else {
                format!("unexpected `{}` in `{}`", e.input, trimmed)
            };
            Err(Error::parse(line, message))
        }
        Err(nom::Err::Incomplete(_)) => Err(Error::parse(line, "incomplete input")),
    }
}

/// Parse a whole script, one command per line
pub fn parse_script(input: &str) -> Result<Vec<Statement>> {
    let mut statements = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        if let Some(command) = parse_line(line, raw)? {
            statements.push(Statement { line, command });
        }
    }
    Ok(statements)
}

fn command(input: &str) -> IResult<&str, Command> {
    let (rest, word) = keyword(input)?;
    match word.to_ascii_uppercase().as_str() {
        "SET" => set_args(rest),
        "GET" => map(key_and_timestamp, |(key, timestamp)| Command::Get { key, timestamp })(rest),
        "GET_AT" | "GETAT" => map(key_and_timestamp, |(key, timestamp)| {
            Command::GetAt { key, timestamp }
        })(rest),
        "DELETE" | "DEL" => map(key_and_timestamp, |(key, timestamp)| Command::Delete {
            key,
            timestamp,
        })(rest),
        "HISTORY" => map(preceded(space1, token), |key| Command::History { key })(rest),
        "STATS" => Ok((rest, Command::Stats)),
        _ => Err(nom::Err::Failure(nom::error::Error::new(
            input,
            ErrorKind::Verify,
        ))),
    }
}

fn set_args(input: &str) -> IResult<&str, Command> {
    map(
        tuple((
            preceded(space1, token),
            preceded(space1, token),
            preceded(space1, timestamp),
            opt(preceded(tuple((space1, tag_no_case("TTL"), space1)), ttl)),
        )),
        |(key, value, timestamp, ttl)| Command::Set {
            key,
            value,
            timestamp,
            ttl,
        },
    )(input)
}

fn key_and_timestamp(input: &str) -> IResult<&str, (String, Timestamp)> {
    pair(preceded(space1, token), preceded(space1, timestamp))(input)
}

fn keyword(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic() || c == '_')(input)
}

fn token(input: &str) -> IResult<&str, String> {
    alt((quoted, bare))(input)
}

fn bare(input: &str) -> IResult<&str, String> {
    map(
        take_while1(|c: char| !c.is_whitespace() && c != '"'),
        String::from,
    )(input)
}

fn quoted(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        fold_many0(
            alt((
                is_not("\\\""),
                preceded(
                    char('\\'),
                    alt((value("\\", char('\\')), value("\"", char('"')))),
                ),
            )),
            String::new,
            |mut acc, piece| {
                acc.push_str(piece);
                acc
            },
        ),
        char('"'),
    )(input)
}

fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i64>)(input)
}

fn timestamp(input: &str) -> IResult<&str, Timestamp> {
    map(integer, Timestamp::new)(input)
}

fn ttl(input: &str) -> IResult<&str, Ttl> {
    map(integer, Ttl::new)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Command {
        parse_line(1, input).unwrap().unwrap()
    }

    #[test]
    fn test_parse_set() {
        assert_eq!(
            parse("SET user:1 active 10"),
            Command::Set {
                key: "user:1".to_string(),
                value: "active".to_string(),
                timestamp: Timestamp::new(10),
                ttl: None,
            }
        );
        assert_eq!(
            parse("set k v -3 ttl 5"),
            Command::Set {
                key: "k".to_string(),
                value: "v".to_string(),
                timestamp: Timestamp::new(-3),
                ttl: Some(Ttl::new(5)),
            }
        );
    }

    #[test]
    fn test_parse_quoted_tokens() {
        assert_eq!(
            parse(r#"SET "my key" "say \"hi\" \\ bye" 1"#),
            Command::Set {
                key: "my key".to_string(),
                value: r#"say "hi" \ bye"#.to_string(),
                timestamp: Timestamp::new(1),
                ttl: None,
            }
        );

        match parse(r#"SET k "" 1"#) {
            Command::Set { value, .. } => assert_eq!(value, ""),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_reads_and_deletes() {
        assert_eq!(
            parse("GET k 4"),
            Command::Get {
                key: "k".to_string(),
                timestamp: Timestamp::new(4)
            }
        );
        assert_eq!(
            parse("  get_at k 4  "),
            Command::GetAt {
                key: "k".to_string(),
                timestamp: Timestamp::new(4)
            }
        );
        assert_eq!(
            parse("DEL k 9"),
            Command::Delete {
                key: "k".to_string(),
                timestamp: Timestamp::new(9)
            }
        );
        assert_eq!(
            parse("history k"),
            Command::History {
                key: "k".to_string()
            }
        );
        assert_eq!(parse("STATS"), Command::Stats);
    }

    #[test]
    fn test_skips_blank_and_comments() {
        assert_eq!(parse_line(1, "").unwrap(), None);
        assert_eq!(parse_line(2, "   ").unwrap(), None);
        assert_eq!(parse_line(3, "# SET k v 1").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_line(7, "FROB k 1").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 7, .. }));
        assert!(err.to_string().contains("unknown command `FROB`"));

        assert!(parse_line(1, "GET k").is_err());
        assert!(parse_line(1, "GET k soon").is_err());
        assert!(parse_line(1, "SET k v 1 TTL").is_err());
        assert!(parse_line(1, "SET k v 1 extra").is_err());
        assert!(parse_line(1, "GET k 99999999999999999999").is_err());
        assert!(parse_line(1, "AT k 4").is_err());
    }

    #[test]
    fn test_parse_script_tracks_lines() {
        let script = "# setup\nSET k a 1\n\nGET k 1\n";
        let statements = parse_script(script).unwrap();

        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].line, 2);
        assert_eq!(statements[1].line, 4);

        let err = parse_script("SET k a 1\nBOGUS\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }
}
