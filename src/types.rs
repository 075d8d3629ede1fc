//! Core types for parsed reply threads

use crate::error::{ParseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Byte range relative to a fragment's content
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// One turn of a quoted email thread
///
/// `content` is split into three consecutive spans: the attribution header,
/// the body and the trailing signature. Either outer span may be empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "FragmentRecord")]
pub struct Fragment {
    index: usize,
    offset: usize,
    content: String,
    headers: Span,
    signatures: Span,
    quoted: bool,
    depth: usize,
}

impl Fragment {
    pub(crate) fn new(
        index: usize,
        offset: usize,
        content: impl Into<String>,
        header_end: usize,
        signature_start: usize,
        quoted: bool,
        depth: usize,
    ) -> Self {
        let content = content.into();
        Self {
            index,
            offset,
            headers: Span::new(0, header_end),
            signatures: Span::new(signature_start, content.len()),
            content,
            quoted,
            depth,
        }
    }

    /// Zero-based position; 0 is the newest, topmost fragment
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Byte offset of this fragment within the normalized text
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The full, unmodified text of this fragment
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content without the attribution header and signature
    #[must_use]
    pub fn body(&self) -> &str {
        self.slice(self.body_span())
    }

    /// The attribution header introducing this fragment, or `""`
    #[must_use]
    pub fn headers(&self) -> &str {
        self.slice(self.headers)
    }

    /// The trailing signature block, or `""`
    #[must_use]
    pub fn signatures(&self) -> &str {
        self.slice(self.signatures)
    }

    /// Whether the fragment begins with quoted (`>`) text
    #[must_use]
    pub const fn quoted(&self) -> bool {
        self.quoted
    }

    /// Quote depth of the fragment body
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub const fn header_span(&self) -> Span {
        self.headers
    }

    #[must_use]
    pub const fn body_span(&self) -> Span {
        Span::new(self.headers.end, self.signatures.start)
    }

    #[must_use]
    pub const fn signature_span(&self) -> Span {
        self.signatures
    }

    #[must_use]
    pub fn has_headers(&self) -> bool {
        !self.headers().is_empty()
    }

    #[must_use]
    pub fn has_signatures(&self) -> bool {
        !self.signatures().is_empty()
    }

    // Spans are exact; the text views drop the line breaks around them
    fn slice(&self, span: Span) -> &str {
        self.content[span.range()].trim_matches('\n')
    }
}

/// Deserialized fragment fields, checked before they become a [`Fragment`]
#[derive(Deserialize)]
struct FragmentRecord {
    index: usize,
    offset: usize,
    content: String,
    headers: Span,
    signatures: Span,
    quoted: bool,
    depth: usize,
}

impl TryFrom<FragmentRecord> for Fragment {
    type Error = ParseError;

    fn try_from(record: FragmentRecord) -> Result<Self> {
        let FragmentRecord {
            index,
            offset,
            content,
            headers,
            signatures,
            quoted,
            depth,
        } = record;

        // Header and signature bound the body; all three must slice `content`
        let partitioned = headers.start == 0
            && headers.end <= signatures.start
            && signatures.end == content.len()
            && content.is_char_boundary(headers.end)
            && content.is_char_boundary(signatures.start);

        if !partitioned {
            return Err(ParseError::InvalidSpans {
                headers,
                signatures,
                len: content.len(),
            });
        }

        Ok(Self {
            index,
            offset,
            content,
            headers,
            signatures,
            quoted,
            depth,
        })
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body())
    }
}

/// A parsed email body: its reply fragments in top-to-bottom order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailMessage {
    text: String,
    fragments: Vec<Fragment>,
    languages: Vec<String>,
}

impl EmailMessage {
    pub(crate) const fn new(text: String, fragments: Vec<Fragment>, languages: Vec<String>) -> Self {
        Self {
            text,
            fragments,
            languages,
        }
    }

    /// All fragments, newest first
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Same as [`fragments`](Self::fragments)
    #[must_use]
    pub fn replies(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Body of the newest fragment
    #[must_use]
    pub fn latest_reply(&self) -> &str {
        self.fragments.first().map_or("", Fragment::body)
    }

    /// The normalized text the fragments were cut from
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Language codes used while parsing, in priority order
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Always false for a parsed message, which has at least one fragment
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    #[must_use]
    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }
}

impl<'a> IntoIterator for &'a EmailMessage {
    type Item = &'a Fragment;
    type IntoIter = std::slice::Iter<'a, Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}
