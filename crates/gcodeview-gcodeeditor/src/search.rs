//! Find and replace.
//!
//! Queries are always regular expressions. Match ranges are **character
//! offsets** (not byte offsets), half-open. An invalid pattern is reported as
//! [`SearchError::InvalidExpression`] and never panics.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SearchError;

/// Options that control how search is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, the pattern is wrapped in `\b` word boundaries.
    pub whole_word: bool,
}

/// A match, expressed as a half-open character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub start: usize,
    pub end: usize,
}

impl SearchMatch {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.char_to_byte
            .get(char_offset)
            .copied()
            .unwrap_or(self.text_len)
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        match self.char_to_byte.binary_search(&byte_offset.min(self.text_len)) {
            Ok(idx) | Err(idx) => idx,
        }
    }
}

/// Compile `query` with the given options.
pub fn compile_query(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.whole_word {
        format!(r"\b(?:{})\b", query)
    } else {
        query.to_string()
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .build()
        .map_err(|err| SearchError::InvalidExpression {
            pattern: query.to_string(),
            reason: err.to_string(),
        })
}

/// Find all non-empty occurrences of `query` in `text`.
///
/// An empty query yields no matches.
pub fn find_matches(
    text: &str,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<SearchMatch>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let re = compile_query(query, options)?;
    let index = CharIndex::new(text);

    Ok(re
        .find_iter(text)
        .filter(|m| !m.is_empty())
        .map(|m| SearchMatch {
            start: index.byte_to_char(m.start()),
            end: index.byte_to_char(m.end()),
        })
        .collect())
}

/// Replace one match; the replacement is inserted literally.
pub fn replace_match(text: &str, m: SearchMatch, replacement: &str) -> String {
    let index = CharIndex::new(text);
    let start = index.char_to_byte(m.start);
    let end = index.char_to_byte(m.end).max(start);
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..start]);
    out.push_str(replacement);
    out.push_str(&text[end..]);
    out
}

/// Replace every match; returns the new text and the number of replacements.
pub fn replace_all(
    text: &str,
    query: &str,
    options: SearchOptions,
    replacement: &str,
) -> Result<(String, usize), SearchError> {
    if query.is_empty() {
        return Ok((text.to_string(), 0));
    }
    let re = compile_query(query, options)?;
    // Empty matches are never reported, so they are not replaced either.
    let mut out = String::with_capacity(text.len());
    let mut end = 0;
    let mut count = 0;
    for m in re.find_iter(text).filter(|m| !m.is_empty()) {
        out.push_str(&text[end..m.start()]);
        out.push_str(replacement);
        end = m.end();
        count += 1;
    }
    out.push_str(&text[end..]);
    Ok((out, count))
}

/// Matches of the last search plus the current one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    query: String,
    options: SearchOptions,
    matches: Vec<SearchMatch>,
    current: Option<usize>,
    error: Option<SearchError>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a search; the first match becomes current.
    pub fn search(
        &mut self,
        text: &str,
        query: &str,
        options: SearchOptions,
    ) -> Result<usize, SearchError> {
        self.query = query.to_string();
        self.options = options;
        self.matches.clear();
        self.current = None;
        self.error = None;

        match find_matches(text, query, options) {
            Ok(matches) => {
                debug!("Search '{}': {} matches", query, matches.len());
                self.current = (!matches.is_empty()).then_some(0);
                self.matches = matches;
                Ok(self.matches.len())
            }
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Repeat the last search against new text.
    pub fn refresh(&mut self, text: &str) -> Result<usize, SearchError> {
        let query = std::mem::take(&mut self.query);
        self.search(text, &query, self.options)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_match(&self) -> Option<SearchMatch> {
        self.current.and_then(|i| self.matches.get(i).copied())
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    /// Advance with wrap-around.
    pub fn next(&mut self) -> Option<SearchMatch> {
        let count = self.matches.len();
        if count == 0 {
            return None;
        }
        self.current = Some(self.current.map_or(0, |i| (i + 1) % count));
        self.current_match()
    }

    /// Step back with wrap-around.
    pub fn prev(&mut self) -> Option<SearchMatch> {
        let count = self.matches.len();
        if count == 0 {
            return None;
        }
        self.current = Some(self.current.map_or(count - 1, |i| (i + count - 1) % count));
        self.current_match()
    }

    /// Text with the current match replaced, if there is one.
    pub fn replace_current(&self, text: &str, replacement: &str) -> Option<String> {
        self.current_match()
            .map(|m| replace_match(text, m, replacement))
    }

    /// Text with every match replaced, if there are any.
    pub fn replace_all(&self, text: &str, replacement: &str) -> Result<Option<String>, SearchError> {
        if self.matches.is_empty() {
            return Ok(None);
        }
        replace_all(text, &self.query, self.options, replacement).map(|(text, _)| Some(text))
    }

    /// Status line for a search panel.
    pub fn status(&self) -> String {
        if self.error.is_some() {
            return "Invalid expression".to_string();
        }
        match self.current {
            Some(i) => format!("{} of {}", i + 1, self.matches.len()),
            None => "No results".to_string(),
        }
    }
}
