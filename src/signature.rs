//! Signature detection at the tail of a fragment

use crate::classify::{Line, LineRole};
use crate::rules::RuleSet;
use regex::Regex;
use std::sync::LazyLock;

/// Lines scanned backward from the end of a fragment
const MAX_SIGNATURE_LINES: usize = 40;

/// Non-blank lines allowed below a closing salutation
const MAX_CLOSING_TAIL: usize = 3;

/// Longest line still considered part of a name block
const MAX_NAME_CHARS: usize = 60;

// "--", "-- " (trailing space is gone after normalization), em/en dash, long underscore rule
static DELIMITER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:--|—|–|_{5,})$").unwrap());

// "-Abhishek Kona"
static SIGN_OFF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-\p{Lu}[\p{L}.'’-]*(?:\s+\p{Lu}[\p{L}.'’-]*){0,3}$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignatureLine {
    /// Starts a signature through the end of the fragment unconditionally
    Delimiter,
    /// "-Name" opening a paragraph, followed by at most a short block
    SignOff,
    /// Starts a signature only when followed by a short name block
    Closing,
    Junk,
}

fn signature_line(line: &Line<'_>, rules: &RuleSet) -> Option<SignatureLine> {
    if DELIMITER_REGEX.is_match(line.stripped) {
        Some(SignatureLine::Delimiter)
    } else if SIGN_OFF_REGEX.is_match(line.stripped) {
        Some(SignatureLine::SignOff)
    } else if rules.is_closing(line.stripped) {
        Some(SignatureLine::Closing)
    } else if line.role == LineRole::Junk {
        Some(SignatureLine::Junk)
    } else {
        None
    }
}

fn is_delimiter(stripped: &str) -> bool {
    DELIMITER_REGEX.is_match(stripped) || SIGN_OFF_REGEX.is_match(stripped)
}

// A blank line, or nothing at all, above line `i`
fn starts_paragraph(lines: &[Line<'_>], i: usize) -> bool {
    i == 0 || lines[i - 1].is_blank()
}

/// Whether a stripped line could open a signature block
pub(crate) fn is_signature_start(stripped: &str, rules: &RuleSet) -> bool {
    is_delimiter(stripped) || rules.is_closing(stripped)
}

/// What lies between the line being examined and the current anchor
/// (the accepted signature start, or the end of the fragment)
#[derive(Debug, Default)]
struct Tail {
    content_lines: usize,
    blank_run: usize,
    widest_gap: usize,
    longest_line: usize,
}

impl Tail {
    fn push_content(&mut self, line: &Line<'_>) {
        if self.content_lines > 0 {
            self.widest_gap = self.widest_gap.max(self.blank_run);
        }
        self.blank_run = 0;
        self.content_lines += 1;
        self.longest_line = self.longest_line.max(line.stripped.chars().count());
    }

    fn accepts_closing(&self, anchored: bool) -> bool {
        if self.content_lines == 0 {
            return anchored && self.blank_run <= 1;
        }
        self.content_lines <= MAX_CLOSING_TAIL
            && self.widest_gap <= 1
            && self.blank_run <= 1
            && self.longest_line <= MAX_NAME_CHARS
    }
}

/// Find where the signature block of a fragment body starts
///
/// `lines` are the body lines of one fragment. Returns the index of the
/// first signature line; the signature runs from there to the end. The scan
/// walks backward over a bounded window and stops at the first change of
/// quote depth, so a signature never mixes quoted and unquoted text.
pub(crate) fn match_signature(lines: &[Line<'_>], rules: &RuleSet) -> Option<usize> {
    let tail_depth = lines.iter().rev().find(|l| !l.is_blank())?.depth;
    let floor = lines.len().saturating_sub(MAX_SIGNATURE_LINES);

    let mut start = None;
    let mut tail = Tail::default();

    for i in (floor..lines.len()).rev() {
        let line = &lines[i];
        if line.is_blank() {
            tail.blank_run += 1;
            continue;
        }
        if line.depth != tail_depth {
            break;
        }

        let accepted = match signature_line(line, rules) {
            Some(SignatureLine::Delimiter) => true,
            Some(SignatureLine::SignOff) => {
                starts_paragraph(lines, i)
                    && (tail.content_lines == 0 || tail.accepts_closing(start.is_some()))
            }
            Some(SignatureLine::Junk) => tail.content_lines == 0,
            Some(SignatureLine::Closing) => tail.accepts_closing(start.is_some()),
            None => false,
        };

        if accepted {
            start = Some(i);
            tail = Tail::default();
        } else {
            tail.push_content(line);
        }
    }

    start
}
