//! G-Code statement tokenizer
//!
//! Splits a source line into a command mnemonic, parameter words and a
//! trailing `;` comment. Tokenizing never fails: malformed numbers become
//! `NaN` and lines without a recognizable command are inert.

use gcodeview_core::Position;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::command::CommandKind;

/// A parameter word: axis/address letter plus numeric value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Address letter, uppercased
    pub letter: char,
    /// Parsed value; `NaN` when the word has no numeric prefix
    pub value: f64,
}

impl Token {
    pub fn new(letter: char, value: f64) -> Self {
        Self { letter, value }
    }
}

/// Result of tokenizing one source line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenizedLine {
    /// Uppercased command mnemonic (`G0`, `G1`, `G90`, `M3`...)
    pub command: Option<String>,
    /// Parameter words in source order
    pub params: Vec<Token>,
    /// Trailing comment including the leading `;`, verbatim
    pub comment: Option<String>,
}

impl TokenizedLine {
    /// Value of the last word with this letter, if any
    pub fn param(&self, letter: char) -> Option<f64> {
        let letter = letter.to_ascii_uppercase();
        self.params
            .iter()
            .rev()
            .find(|token| token.letter == letter)
            .map(|token| token.value)
    }

    /// Axis and feed words of this line
    pub fn axis_words(&self) -> AxisWords {
        AxisWords {
            x: self.param('X'),
            y: self.param('Y'),
            z: self.param('Z'),
            feed: self.param('F'),
        }
    }
}

/// X/Y/Z/F words present on a statement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisWords {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub feed: Option<f64>,
}

impl AxisWords {
    /// True when at least one of X, Y or Z is present
    pub fn has_axis(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.z.is_some()
    }

    /// Carry unspecified axes forward from `current`
    pub fn apply(&self, current: Position) -> Position {
        Position {
            x: self.x.unwrap_or(current.x),
            y: self.y.unwrap_or(current.y),
            z: self.z.unwrap_or(current.z),
        }
    }
}

/// A non-blank, non-comment source line
#[derive(Debug, Clone, PartialEq)]
pub struct Statement<'a> {
    /// 0-based physical line index in the source text
    pub line: usize,
    /// The line as written
    pub raw: &'a str,
    /// Tokenized contents
    pub tokens: TokenizedLine,
}

impl Statement<'_> {
    /// Classify this statement's command
    pub fn kind(&self) -> CommandKind {
        match &self.tokens.command {
            Some(command) => CommandKind::classify(command),
            None => CommandKind::Other,
        }
    }
}

fn command_regex() -> &'static Regex {
    static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();
    COMMAND_REGEX.get_or_init(|| Regex::new(r"^[GM]\d+").expect("invalid regex pattern"))
}

fn number_prefix_regex() -> &'static Regex {
    static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    NUMBER_REGEX.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("invalid regex pattern")
    })
}

/// Parse the longest numeric prefix of `text`, or `NaN` if there is none
pub fn parse_number(text: &str) -> f64 {
    number_prefix_regex()
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Format `value` with `decimals` places, rounding halves away from zero.
///
/// `format!("{:.2}")` rounds exact ties to even, so `0.125` would print as
/// `0.12`; G-Code output and position keys expect `0.13`.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    format!("{:.*}", decimals, if rounded.is_finite() { rounded } else { value })
}

/// Split a trimmed line into its code part and its `;` comment
pub fn split_comment(line: &str) -> (&str, Option<&str>) {
    match line.find(';') {
        Some(idx) => (line[..idx].trim(), Some(&line[idx..])),
        None => (line.trim(), None),
    }
}

/// True for lines every downstream consumer skips
pub fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with(';')
}

fn parse_param(word: &str) -> Option<Token> {
    let first = word.chars().next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    Some(Token::new(
        first.to_ascii_uppercase(),
        parse_number(&word[first.len_utf8()..]),
    ))
}

/// Tokenize a single source line
pub fn tokenize(line: &str) -> TokenizedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return TokenizedLine::default();
    }
    if trimmed.starts_with(';') {
        return TokenizedLine {
            comment: Some(trimmed.to_string()),
            ..TokenizedLine::default()
        };
    }

    let (code, comment) = split_comment(trimmed);
    let comment = comment.map(str::to_string);
    let mut words = code.split_whitespace().peekable();

    let command = words
        .peek()
        .map(|word| word.to_uppercase())
        .filter(|word| command_regex().is_match(word));
    if command.is_some() {
        words.next();
    }

    TokenizedLine {
        command,
        params: words.filter_map(parse_param).collect(),
        comment,
    }
}

/// Iterate the statements of `text`, skipping blank and pure-comment lines
///
/// Skipped lines still consume a line index.
pub fn statements(text: &str) -> impl Iterator<Item = Statement<'_>> {
    text.split('\n').enumerate().filter_map(|(line, raw)| {
        if is_blank_or_comment(raw) {
            return None;
        }
        Some(Statement {
            line,
            raw,
            tokens: tokenize(raw),
        })
    })
}
