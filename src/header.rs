//! Attribution header matching

use crate::classify::Line;
use crate::rules::{RuleBundle, RuleSet};

/// Physical lines an attribution header may span ("On ...", "<address>", "wrote:")
const MAX_ATTRIBUTION_LINES: usize = 3;

/// Field lines consumed by a metadata header block
const MAX_HEADER_FIELDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeaderKind {
    /// "On <date>, <sender> wrote:" and its localized forms
    Attribution,
    /// "From: ... / Sent: ... / Subject: ..." blocks
    Metadata,
}

/// A recognized header at the start of a line sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeaderMatch {
    /// Number of physical lines making up the header (at least 1)
    pub(crate) consumed: usize,
    pub(crate) kind: HeaderKind,
    pub(crate) language: &'static str,
}

/// Try to match a header starting at the first of `lines`
///
/// The selected bundles are tried in order, then the language independent
/// rules, and the first one that accepts wins. A header never spans blank
/// lines or lines at another quote depth.
pub(crate) fn match_header(lines: &[Line<'_>], rules: &RuleSet) -> Option<HeaderMatch> {
    let first = lines.first()?;
    if first.is_blank() {
        return None;
    }

    rules.header_bundles().find_map(|bundle| {
        attribution(lines, bundle)
            .map(|consumed| (consumed, HeaderKind::Attribution))
            .or_else(|| metadata_block(lines, bundle).map(|c| (c, HeaderKind::Metadata)))
            .map(|(consumed, kind)| HeaderMatch {
                consumed,
                kind,
                language: bundle.code(),
            })
    })
}

fn attribution(lines: &[Line<'_>], bundle: &RuleBundle) -> Option<usize> {
    let patterns = bundle.attribution()?;
    let first = &lines[0];

    if patterns
        .start
        .as_ref()
        .is_some_and(|start| start.is_match(first.stripped))
    {
        let mut joined = String::from(first.stripped);
        for (offset, line) in lines.iter().enumerate().take(MAX_ATTRIBUTION_LINES) {
            if offset > 0 {
                if line.is_blank() || line.depth != first.depth {
                    break;
                }
                joined.push(' ');
                joined.push_str(line.stripped);
            }
            if patterns.cue.is_match(&joined) {
                return Some(offset + 1);
            }
        }
    }

    // "Jane Doe <jane@example.com> wrote:" without the leading date part
    (patterns.cue.is_match(first.stripped) && first.stripped.contains('@')).then_some(1)
}

fn metadata_block(lines: &[Line<'_>], bundle: &RuleBundle) -> Option<usize> {
    let depth = lines[0].depth;
    let separator = bundle.is_separator(lines[0].stripped);
    let skip = usize::from(separator);

    let mut fields = 0;
    let mut has_sender = false;

    for line in lines.iter().skip(skip).take(MAX_HEADER_FIELDS) {
        if line.depth != depth || !bundle.is_field(line.stripped) {
            break;
        }
        has_sender |= bundle.is_sender_field(line.stripped);
        fields += 1;
    }

    let accepted = has_sender && (fields >= 2 || (separator && fields >= 1));
    accepted.then_some(skip + fields)
}
