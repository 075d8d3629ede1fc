//! Fragment assembly from classified lines

use crate::classify::{Line, LineRole};
use crate::header::match_header;
use crate::rules::RuleSet;
use crate::signature::match_signature;
use crate::types::Fragment;
use tracing::trace;

/// Line ranges of a fragment under construction
#[derive(Debug)]
struct Open {
    first: usize,
    /// Line index just past the attribution header, if there is one
    header_end: Option<usize>,
    header_depth: usize,
    /// Depth being collected; `None` while a header still waits for its body
    depth: Option<usize>,
    /// Depth of the first non-blank line
    lead_depth: Option<usize>,
    has_body: bool,
}

impl Open {
    const fn collecting(first: usize, depth: usize) -> Self {
        Self {
            first,
            header_end: None,
            header_depth: depth,
            depth: Some(depth),
            lead_depth: None,
            has_body: false,
        }
    }

    /// Only the leading blank lines of the first fragment can precede a header
    fn accepts_header(&self, depth: usize) -> bool {
        !self.has_body && self.header_end.is_none() && self.depth == Some(depth)
    }
}

/// Closed fragment, still in line indices
#[derive(Debug)]
struct Segment {
    first: usize,
    end: usize,
    header_end: usize,
    quoted: bool,
    depth: usize,
}

/// Group classified lines into fragments and carve out signatures
///
/// `text` is the normalized text the lines were classified from. The
/// returned fragments cover it exactly, in order.
pub(crate) fn build(text: &str, lines: &[Line<'_>], rules: &RuleSet) -> Vec<Fragment> {
    let segments = group(lines, rules);
    let offset_of = |i: usize| lines.get(i).map_or(text.len(), |l| l.start);

    segments
        .iter()
        .enumerate()
        .map(|(index, seg)| {
            let start = offset_of(seg.first);
            let end = offset_of(seg.end);
            let signature_line = match_signature(&lines[seg.header_end..seg.end], rules)
                .map_or(seg.end, |i| seg.header_end + i);

            trace!(
                "Fragment {index}: lines {}..{}, depth {}, header lines {}, signature at line {}",
                seg.first,
                seg.end,
                seg.depth,
                seg.header_end - seg.first,
                signature_line
            );

            Fragment::new(
                index,
                start,
                &text[start..end],
                offset_of(seg.header_end) - start,
                offset_of(signature_line) - start,
                seg.quoted,
                seg.depth,
            )
        })
        .collect()
}

fn group(lines: &[Line<'_>], rules: &RuleSet) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut open = Open::collecting(0, 0);
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];

        if line.is_blank() {
            i += 1;
            continue;
        }

        if line.role == LineRole::HeaderCandidate
            && let Some(header) = match_header(&lines[i..], rules)
        {
            trace!(
                "Header at line {i}: {} lines, {:?} ({})",
                header.consumed, header.kind, header.language
            );
            if !open.accepts_header(line.depth) {
                segments.push(close(&open, i));
                open = Open::collecting(i, line.depth);
            }
            open.header_end = Some(i + header.consumed);
            open.header_depth = line.depth;
            open.depth = None;
            open.lead_depth = open.lead_depth.or(Some(line.depth));
            i += header.consumed;
            continue;
        }

        match open.depth {
            // The body of a header is expected at the header's depth or deeper
            None if line.depth >= open.header_depth => open.depth = Some(line.depth),
            Some(depth) if depth == line.depth => {}
            _ => {
                segments.push(close(&open, i));
                open = Open::collecting(i, line.depth);
            }
        }
        open.lead_depth = open.lead_depth.or(Some(line.depth));
        open.has_body = true;
        i += 1;
    }

    segments.push(close(&open, lines.len()));
    segments
}

fn close(open: &Open, end: usize) -> Segment {
    Segment {
        first: open.first,
        end,
        header_end: open.header_end.unwrap_or(open.first),
        quoted: open.lead_depth.is_some_and(|d| d > 0),
        depth: open.depth.unwrap_or(open.header_depth),
    }
}
