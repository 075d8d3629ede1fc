//! Text normalization ahead of classification

use crate::classify::{is_prose, split_quote};
use crate::rules::RuleSet;

/// Canonicalize line endings and strip trailing whitespace from every line
///
/// `\r\n` and lone `\r` become `\n`. Blank lines, indentation and a final
/// newline are kept, and normalizing twice changes nothing.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(unified.len());

    for (i, line) in unified.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.trim_end());
    }

    out
}

/// Join hard-wrapped prose lines into one logical line
///
/// A line is appended to the previous logical line, separated by a space,
/// when both are unquoted, unindented prose: not blank and not the start of
/// a header, a signature or a device footer. The test is made against the
/// accumulated logical line, so applying this twice gives the same result.
pub(crate) fn unwrap_soft_breaks(text: &str, rules: &RuleSet) -> String {
    let mut out = String::with_capacity(text.len());
    let mut lines = text.split('\n');
    let mut logical = lines.next().unwrap_or_default().to_string();

    for line in lines {
        if is_wrappable(&logical, rules) && is_wrappable(line, rules) {
            logical.push(' ');
            logical.push_str(line);
        } else {
            out.push_str(&logical);
            out.push('\n');
            logical = line.to_string();
        }
    }
    out.push_str(&logical);

    out
}

fn is_wrappable(line: &str, rules: &RuleSet) -> bool {
    let (depth, stripped) = split_quote(line);
    depth == 0 && !line.starts_with(char::is_whitespace) && is_prose(stripped, rules)
}
