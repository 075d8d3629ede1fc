//! Reply parser: configuration, language resolution and the parse pipeline

use crate::builder::build;
use crate::classify::classify;
use crate::error::{ParseError, Result};
use crate::normalize::{normalize, unwrap_soft_breaks};
use crate::rules::{DEFAULT_LANGUAGE, RuleBundle, RuleSet, bundle_for};
use crate::types::EmailMessage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parser configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserConfig {
    /// Language codes in priority order
    pub languages: Vec<String>,

    /// Used when none of `languages` is known; `None` turns that into an error
    pub default_language: Option<String>,

    /// Join hard-wrapped prose lines before segmenting
    pub unwrap_soft_breaks: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            default_language: Some(DEFAULT_LANGUAGE.to_string()),
            unwrap_soft_breaks: false,
        }
    }
}

impl ParserConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_default_language(mut self, code: impl Into<String>) -> Self {
        self.default_language = Some(code.into());
        self
    }

    #[must_use]
    pub fn without_default_language(mut self) -> Self {
        self.default_language = None;
        self
    }

    #[must_use]
    pub const fn with_soft_break_unwrapping(mut self, enabled: bool) -> Self {
        self.unwrap_soft_breaks = enabled;
        self
    }
}

/// Splits email bodies into reply fragments
///
/// A parser holds only read-only, resolved configuration and can be shared
/// between threads.
#[derive(Debug, Clone)]
pub struct ReplyParser {
    rules: RuleSet,
    unwrap_soft_breaks: bool,
}

impl Default for ReplyParser {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            unwrap_soft_breaks: false,
        }
    }
}

impl ReplyParser {
    /// Build a parser, resolving the configured languages against the registry
    pub fn new(config: ParserConfig) -> Result<Self> {
        let rules = resolve_languages(&config)?;
        debug!("Reply parser languages: {:?}", rules.codes());

        Ok(Self {
            rules,
            unwrap_soft_breaks: config.unwrap_soft_breaks,
        })
    }

    /// Build a parser for the given languages with the built-in default
    pub fn with_languages(languages: &[&str]) -> Result<Self> {
        Self::new(ParserConfig::new().with_languages(languages.iter().copied()))
    }

    /// Resolved language codes in priority order
    #[must_use]
    pub fn languages(&self) -> Vec<String> {
        self.rules.codes()
    }

    /// The text actually segmented for a raw input
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let text = normalize(raw);
        if self.unwrap_soft_breaks {
            unwrap_soft_breaks(&text, &self.rules)
        } else {
            text
        }
    }

    /// Parse an email body into its reply fragments
    #[must_use]
    pub fn read(&self, text: &str) -> EmailMessage {
        let text = self.normalize(text);
        let lines = classify(&text, &self.rules);
        let fragments = build(&text, &lines, &self.rules);

        debug!(
            "Parsed reply thread: {} lines into {} fragments",
            lines.len(),
            fragments.len()
        );

        EmailMessage::new(text, fragments, self.rules.codes())
    }

    /// Body of the newest reply only
    #[must_use]
    pub fn parse_reply(&self, text: &str) -> String {
        self.read(text).latest_reply().to_string()
    }

    /// Bodies of all fragments, newest first
    #[must_use]
    pub fn parse_replies(&self, text: &str) -> Vec<String> {
        self.read(text)
            .fragments()
            .iter()
            .map(|f| f.body().to_string())
            .collect()
    }
}

/// Parse an email body with the given languages, falling back to English
pub fn read(text: &str, languages: &[&str]) -> Result<EmailMessage> {
    Ok(ReplyParser::with_languages(languages)?.read(text))
}

fn resolve_languages(config: &ParserConfig) -> Result<RuleSet> {
    let default = match &config.default_language {
        Some(code) => {
            Some(bundle_for(code).ok_or_else(|| ParseError::UnknownDefaultLanguage(code.clone()))?)
        }
        None => None,
    };

    let mut bundles: Vec<&'static RuleBundle> = Vec::new();
    for code in &config.languages {
        match bundle_for(code) {
            Some(bundle) if !bundles.iter().any(|b| b.code() == bundle.code()) => {
                bundles.push(bundle);
            }
            Some(_) => {}
            None => debug!("Ignoring unknown language: {code}"),
        }
    }

    if bundles.is_empty() {
        let bundle = default.ok_or_else(|| ParseError::NoLanguage {
            requested: config.languages.clone(),
        })?;
        bundles.push(bundle);
    }

    Ok(RuleSet::new(bundles))
}
