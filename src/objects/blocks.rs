//! Block extraction and body parsing
//!
//! Format assumption: the monitored format never nests braces, so a
//! non-greedy match up to the first closing brace is correct. This is not a
//! general brace matcher.

use regex::Regex;
use std::collections::BTreeMap;

/// Lazy iterator over raw block bodies, in document order.
///
/// Restart by calling [`define_blocks`] or [`bare_blocks`] again on the
/// same input.
pub struct Blocks<'t> {
    re: Regex,
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for Blocks<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        let caps = self.re.captures(&self.text[self.pos..])?;
        let whole = caps.get(0)?;
        let body = caps.get(1)?;
        let item = &self.text[self.pos + body.start()..self.pos + body.end()];
        self.pos += whole.end();
        Some(item)
    }
}

/// Iterate over the bodies of `define <label> { ... }` blocks.
pub fn define_blocks<'t>(text: &'t str, label: &str) -> Blocks<'t> {
    let pattern = format!(r"define\s+{}\s*\{{([^}}]*)\}}", regex::escape(label));
    Blocks {
        re: Regex::new(&pattern).expect("block pattern is valid"),
        text,
        pos: 0,
    }
}

/// Iterate over the bodies of bare `<label> { ... }` blocks, as used by the
/// status snapshot.
pub fn bare_blocks<'t>(text: &'t str, label: &str) -> Blocks<'t> {
    let pattern = format!(r"\b{}\s*\{{([^}}]*)\}}", regex::escape(label));
    Blocks {
        re: Regex::new(&pattern).expect("block pattern is valid"),
        text,
        pos: 0,
    }
}

/// Parse a definition block body into an attribute map.
///
/// Empty lines and `#`/`;` comment lines are skipped; each remaining line
/// splits on its first whitespace run. A later duplicate key overwrites an
/// earlier one.
pub fn parse_define_body(body: &str) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some((key, value)) = line.split_once(char::is_whitespace) {
            attrs.insert(key.to_string(), value.trim().to_string());
        }
    }
    attrs
}

/// Parse a status block body into an attribute map.
///
/// Lines split on the first `=`; lines without one are skipped. Same
/// overwrite-on-duplicate rule as [`parse_define_body`].
pub fn parse_status_body(body: &str) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            attrs.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    attrs
}
