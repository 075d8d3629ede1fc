//! Line classification: quote depth and candidate role of every line

use crate::rules::RuleSet;
use crate::signature;

/// Candidate role of a normalized line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineRole {
    Plain,
    HeaderCandidate,
    SignatureCandidate,
    /// Device boilerplate standing on its own
    Junk,
}

/// One line of the normalized text
#[derive(Debug, Clone)]
pub(crate) struct Line<'a> {
    /// Byte offset of the line in the normalized text
    pub(crate) start: usize,
    /// Line text with quote markers removed
    pub(crate) stripped: &'a str,
    pub(crate) depth: usize,
    pub(crate) role: LineRole,
}

impl Line<'_> {
    /// Blank or marker-only (">>") lines carry no content and never change depth
    pub(crate) const fn is_blank(&self) -> bool {
        self.stripped.is_empty()
    }
}

/// Number of leading `>` quote markers on a line
///
/// Markers may be separated by single spaces, so `"> > text"` and
/// `">> text"` both have depth 2.
#[must_use]
pub fn quote_depth(line: &str) -> usize {
    split_quote(line).0
}

pub(crate) fn split_quote(line: &str) -> (usize, &str) {
    let mut depth = 0;
    let mut rest = line;

    loop {
        if let Some(r) = rest.strip_prefix('>') {
            rest = r;
        } else if depth > 0
            && let Some(r) = rest.strip_prefix(" >")
        {
            rest = r;
        } else {
            break;
        }
        depth += 1;
    }

    (depth, rest.trim_start())
}

/// Whether a stripped line reads as ordinary prose for the active rules
pub(crate) fn is_prose(stripped: &str, rules: &RuleSet) -> bool {
    !stripped.is_empty()
        && !rules.is_header_start(stripped)
        && !signature::is_signature_start(stripped, rules)
        && !rules.is_junk(stripped)
}

/// Split normalized text into classified lines
///
/// The lines cover the text exactly: line `i` spans from its `start` up to
/// the next line's `start`, the last one up to the end of the text.
pub(crate) fn classify<'a>(text: &'a str, rules: &RuleSet) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    let mut junk = Vec::new();
    let mut start = 0;

    for raw in text.split('\n') {
        let (depth, stripped) = split_quote(raw);
        let role = if stripped.is_empty() {
            LineRole::Plain
        } else if rules.is_header_start(stripped) {
            LineRole::HeaderCandidate
        } else if signature::is_signature_start(stripped, rules) {
            LineRole::SignatureCandidate
        } else {
            if rules.is_junk(stripped) {
                junk.push(lines.len());
            }
            LineRole::Plain
        };

        lines.push(Line {
            start,
            stripped,
            depth,
            role,
        });
        start += raw.len() + 1;
    }

    let next_content = next_content_lines(&lines);
    for i in junk {
        if is_isolated(&lines, &next_content, i) {
            lines[i].role = LineRole::Junk;
        }
    }

    lines
}

/// For every line, the index of the next non-blank line after it
fn next_content_lines(lines: &[Line<'_>]) -> Vec<Option<usize>> {
    let mut next = vec![None; lines.len()];
    let mut upcoming = None;

    for i in (0..lines.len()).rev() {
        next[i] = upcoming;
        if !lines[i].is_blank() {
            upcoming = Some(i);
        }
    }

    next
}

/// A junk line must stand alone: nothing but a blank line or a depth change
/// above it, and below it only blank lines, signature lines or the start of
/// something else.
fn is_isolated(lines: &[Line<'_>], next_content: &[Option<usize>], i: usize) -> bool {
    let line = &lines[i];
    let open_above = i == 0 || {
        let above = &lines[i - 1];
        above.is_blank() || above.depth != line.depth
    };

    open_above
        && next_content[i].is_none_or(|j| {
            let below = &lines[j];
            below.depth != line.depth
                || matches!(
                    below.role,
                    LineRole::HeaderCandidate | LineRole::SignatureCandidate
                )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_quote_depths() {
        assert_eq!(split_quote("plain"), (0, "plain"));
        assert_eq!(split_quote("> one"), (1, "one"));
        assert_eq!(split_quote(">> two"), (2, "two"));
        assert_eq!(split_quote("> > two"), (2, "two"));
        assert_eq!(split_quote(">"), (1, ""));
        assert_eq!(split_quote(" > not quoted"), (0, "> not quoted"));
    }

    #[test]
    fn test_lines_cover_text() {
        let text = "a\n\n> b\n";
        let lines = classify(text, &RuleSet::default());
        let starts: Vec<usize> = lines.iter().map(|l| l.start).collect();
        assert_eq!(starts, vec![0, 2, 3, 7]);
        assert_eq!(lines[2].depth, 1);
        assert!(lines[3].is_blank());
    }

    #[test]
    fn test_header_candidates() {
        let rules = RuleSet::default();
        let lines = classify("On Mon, Bob wrote:\nFrom: a@b.c\nhello", &rules);
        assert_eq!(lines[0].role, LineRole::HeaderCandidate);
        assert_eq!(lines[1].role, LineRole::HeaderCandidate);
        assert_eq!(lines[2].role, LineRole::Plain);
    }

    #[test]
    fn test_isolated_junk() {
        let rules = RuleSet::default();
        let lines = classify("Hello\n\nSent from my iPhone", &rules);
        assert_eq!(lines[2].role, LineRole::Junk);
    }

    #[test]
    fn test_junk_inside_paragraph_is_plain() {
        let rules = RuleSet::default();
        let lines = classify("Hello\nSent from my iPhone", &rules);
        assert_eq!(lines[1].role, LineRole::Plain);

        let lines = classify("Sent from my iPhone\nbut more text follows", &rules);
        assert_eq!(lines[0].role, LineRole::Plain);
    }
}
