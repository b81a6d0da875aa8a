//! Dice notation: `[+|-][count]d<sides>[(+|-)<modifier>] [(<source>)]`,
//! or a bare integer for a constant.
//!
//! [`Die::parse`] is lenient: any numeric fragment that fails to parse counts
//! as zero. [`Die::try_parse`] (and `FromStr`) reports the offending fragment.

use std::str::FromStr;

use thiserror::Error;

use crate::die::Die;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty dice notation")]
    Empty,
    #[error("invalid constant: {0:?}")]
    InvalidConstant(String),
    #[error("invalid dice count: {0:?}")]
    InvalidCount(String),
    #[error("invalid die sides: {0:?}")]
    InvalidSides(String),
    #[error("invalid modifier: {0:?}")]
    InvalidModifier(String),
    #[error("unexpected trailing input: {0:?}")]
    Trailing(String),
}

/// Notation split into its raw fragments, before any number is read.
struct Fragments<'a> {
    debuff: bool,
    source: Option<&'a str>,
    shape: Shape<'a>,
}

#[derive(Clone, Copy)]
enum Shape<'a> {
    Constant(&'a str),
    Dice {
        count: &'a str,
        sides: &'a str,
        modifier: Option<(i32, &'a str)>,
        trailing: Option<&'a str>,
    },
}

/// Peel a trailing `(label)` off the original text so the label keeps its case.
/// Notation never contains `(`, so the first one opens the label.
fn split_source(text: &str) -> (&str, Option<&str>) {
    if let Some(body) = text.strip_suffix(')') {
        if let Some((notation, label)) = body.split_once('(') {
            let label = label.trim();
            if !label.is_empty() {
                return (notation.trim_end(), Some(label));
            }
        }
    }
    (text, None)
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest.trim_start())
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest.trim_start())
    } else {
        (false, text)
    }
}

fn split_shape(body: &str) -> Shape<'_> {
    if !body.contains('d') {
        return Shape::Constant(body);
    }
    let (dice, modifier, trailing) = split_modifier(body);
    let (count, sides) = dice.split_once('d').unwrap_or((dice, ""));
    Shape::Dice {
        count: count.trim(),
        sides: sides.trim(),
        modifier,
        trailing,
    }
}

/// A `+` bonus wins over a `-` penalty when both appear.
fn split_modifier(body: &str) -> (&str, Option<(i32, &str)>, Option<&str>) {
    for (sep, sign) in [('+', 1), ('-', -1)] {
        let mut parts = body.splitn(3, sep);
        let dice = parts.next().unwrap_or_default();
        if let Some(modifier) = parts.next() {
            return (dice, Some((sign, modifier.trim())), parts.next());
        }
    }
    (body, None, None)
}

fn fragments<'a>(lowered: &'a str, source: Option<&'a str>) -> Fragments<'a> {
    let (debuff, body) = split_sign(lowered);
    Fragments {
        debuff,
        source,
        shape: split_shape(body),
    }
}

impl Fragments<'_> {
    fn finish(&self, die: Die) -> Die {
        let die = match self.source {
            Some(label) => die.with_source(label),
            None => die,
        };
        if self.debuff { die.as_debuff() } else { die }
    }
}

fn lenient<T: FromStr + Default>(fragment: &str) -> T {
    fragment.trim().parse().unwrap_or_default()
}

fn strict<T: FromStr>(fragment: &str, err: fn(String) -> ParseError) -> Result<T, ParseError> {
    fragment.trim().parse().map_err(|_| err(fragment.to_string()))
}

impl Die {
    /// Parse notation such as `2d6+3`, `d16`, `-1d4 (Bane)` or `5`.
    /// Malformed numbers read as zero; this never fails.
    pub fn parse(text: &str) -> Die {
        let (notation, source) = split_source(text.trim());
        let lowered = notation.to_lowercase();
        let frags = fragments(&lowered, source);
        let die = match frags.shape {
            Shape::Constant(value) => Die::constant(lenient(value)),
            Shape::Dice {
                count,
                sides,
                modifier,
                ..
            } => {
                let count = if count.is_empty() { 1 } else { lenient(count) };
                let modifier = modifier.map_or(0, |(sign, m)| sign * lenient::<i32>(m));
                Die::new(count, lenient(sides)).with_modifier(modifier)
            }
        };
        frags.finish(die)
    }

    /// Parse notation, rejecting anything [`Die::parse`] would silently zero.
    pub fn try_parse(text: &str) -> Result<Die, ParseError> {
        let (notation, source) = split_source(text.trim());
        let lowered = notation.to_lowercase();
        let frags = fragments(&lowered, source);
        let die = match frags.shape {
            Shape::Constant(value) => {
                if value.is_empty() {
                    return Err(ParseError::Empty);
                }
                Die::constant(strict(value, ParseError::InvalidConstant)?)
            }
            Shape::Dice {
                count,
                sides,
                modifier,
                trailing,
            } => {
                if let Some(rest) = trailing {
                    return Err(ParseError::Trailing(rest.to_string()));
                }
                let count = if count.is_empty() {
                    1
                } else {
                    strict(count, ParseError::InvalidCount)?
                };
                let sides = strict(sides, ParseError::InvalidSides)?;
                let modifier = match modifier {
                    Some((sign, m)) => sign * strict::<i32>(m, ParseError::InvalidModifier)?,
                    None => 0,
                };
                Die::new(count, sides).with_modifier(modifier)
            }
        };
        Ok(frags.finish(die))
    }
}

impl FromStr for Die {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Die::try_parse(s)
    }
}
