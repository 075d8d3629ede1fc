// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Reply Parser
//!
//! Splits the plain-text body of an email into reply fragments: one per turn
//! of a quoted thread, each with its attribution header, body and signature
//! separated.
//!
//! # Features
//!
//! - Quote depth tracking (`>`, `>>`, `> >`)
//! - Attribution headers in several languages, including headers wrapped
//!   over multiple lines ("On ... wrote:", "Am ... schrieb ...:")
//! - Outlook style `From:` / `Sent:` / `Subject:` header blocks
//! - Signature detection: `--` delimiters, closing salutations and
//!   "Sent from my iPhone" style footers
//! - Exact spans: the fragments always add up to the normalized input
//!
//! # Example
//!
//! ```rust
//! use email_reply::ReplyParser;
//!
//! let parser = ReplyParser::with_languages(&["en"]).unwrap();
//! let email = parser.read("Sounds good.\n\nOn Mon, Jan 3, 2011, Bob <bob@example.com> wrote:\n> Lunch?\n");
//!
//! assert_eq!(email.fragments().len(), 2);
//! assert_eq!(email.latest_reply(), "Sounds good.");
//! assert_eq!(email.fragments()[1].body(), "> Lunch?");
//! ```

mod builder;
mod classify;
mod error;
mod header;
mod normalize;
mod parser;
mod rules;
mod signature;
mod types;

pub use classify::quote_depth;
pub use error::{ParseError, Result};
pub use normalize::normalize;
pub use parser::{ParserConfig, ReplyParser, read};
pub use rules::{DEFAULT_LANGUAGE, RuleBundle, available_languages, bundle_for};
pub use types::*;
