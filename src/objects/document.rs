//! Structured view of one definition file
//!
//! A file is parsed once into an ordered sequence of typed blocks with byte
//! spans, so that removing a host's blocks operates on structural elements
//! instead of re-deriving spans by pattern matching. Each span is widened to
//! cover the comment lines immediately above the block, which travel with
//! it on removal.

use regex::Regex;
use std::sync::LazyLock;

static DEFINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"define\s+(\w+)\s*\{([^}]*)\}").expect("define pattern is valid"));

/// Word-boundary matcher for a `host_name <name>` attribute line.
pub fn host_name_line(host_name: &str) -> Regex {
    let pattern = format!(r"(?m)^\s*host_name\s+{}\s*$", regex::escape(host_name));
    Regex::new(&pattern).expect("host_name pattern is valid")
}

#[derive(Debug)]
struct Block {
    kind: String,
    body: String,
    /// Span start, widened over immediately preceding comment lines
    start: usize,
    /// Span end, widened over trailing whitespace up to the next content
    end: usize,
}

/// One definition file parsed into an ordered block sequence.
#[derive(Debug)]
pub struct Document {
    text: String,
    blocks: Vec<Block>,
}

/// Result of removing a host's blocks from a document.
#[derive(Debug)]
pub struct Removal {
    /// Remaining file content, trimmed, with a single trailing newline
    /// (empty when nothing remains)
    pub text: String,
    /// Number of blocks removed
    pub removed: usize,
    /// True when only comments/whitespace remain, meaning the file itself
    /// should be deleted
    pub empty: bool,
}

impl Document {
    pub fn parse(text: &str) -> Document {
        let mut blocks = Vec::new();
        let mut last_end = 0;
        for caps in DEFINE_RE.captures_iter(text) {
            let whole = caps.get(0).expect("whole match");
            let kind = caps.get(1).expect("kind group").as_str().to_string();
            let body = caps.get(2).expect("body group").as_str().to_string();
            let start = widen_over_comments(text, whole.start(), last_end);
            let end = widen_over_whitespace(text, whole.end());
            last_end = end;
            blocks.push(Block {
                kind,
                body,
                start,
                end,
            });
        }
        Document {
            text: text.to_string(),
            blocks,
        }
    }

    /// Remove every `host`/`service` block whose `host_name` attribute
    /// exactly equals the target, together with attached comment lines.
    pub fn remove_host(&self, host_name: &str) -> Removal {
        let target = host_name_line(host_name);
        let mut out = String::new();
        let mut cursor = 0;
        let mut removed = 0;

        for block in &self.blocks {
            let is_target = (block.kind == "host" || block.kind == "service")
                && target.is_match(&block.body);
            if is_target {
                if block.start > cursor {
                    out.push_str(&self.text[cursor..block.start]);
                }
                cursor = cursor.max(block.end);
                removed += 1;
            }
        }
        out.push_str(&self.text[cursor..]);

        let trimmed = out.trim();
        let empty = trimmed.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#') || line.starts_with(';')
        });
        let text = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{}\n", trimmed)
        };

        Removal {
            text,
            removed,
            empty,
        }
    }
}

/// Walk the span start back over contiguous comment lines, without crossing
/// into the previous block's span.
fn widen_over_comments(text: &str, match_start: usize, floor: usize) -> usize {
    let mut start = text[..match_start]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    while start > floor {
        let prev_start = text[..start - 1].rfind('\n').map(|i| i + 1).unwrap_or(0);
        if prev_start < floor {
            break;
        }
        let prev_line = text[prev_start..start - 1].trim();
        if prev_line.starts_with('#') || prev_line.starts_with(';') {
            start = prev_start;
        } else {
            break;
        }
    }
    start
}

fn widen_over_whitespace(text: &str, end: usize) -> usize {
    text[end..]
        .find(|c: char| !c.is_whitespace())
        .map(|i| end + i)
        .unwrap_or(text.len())
}
