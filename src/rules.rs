//! Language rule registry
//!
//! Every supported language is a plain data entry in `LANGUAGES`; the
//! registry compiles each entry once into a [`RuleBundle`] and never changes
//! afterwards. Adding a locale means adding a table entry, nothing else.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Language code used when a parser is not given any usable language
pub const DEFAULT_LANGUAGE: &str = "en";

/// Raw pattern data for one language
struct LanguageEntry {
    code: &'static str,
    name: &'static str,
    /// Pattern opening an attribution header ("On <date>")
    attribution_start: Option<&'static str>,
    /// Pattern ending an attribution header ("wrote:")
    attribution_cue: Option<&'static str>,
    /// Field labels naming the sender ("From", "Von", ...)
    sender_labels: &'static [&'static str],
    /// Remaining header field labels
    field_labels: &'static [&'static str],
    /// Lines introducing an original or forwarded message (regex)
    separators: &'static [&'static str],
    /// Closing salutations (literal phrases)
    closings: &'static [&'static str],
    /// Device and client footers (regex)
    junk: &'static [&'static str],
}

static LANGUAGES: &[LanguageEntry] = &[
    LanguageEntry {
        code: "en",
        name: "English",
        attribution_start: Some(r"^On\s+\S"),
        attribution_cue: Some(r"\bwrote\s*:$"),
        sender_labels: &["From"],
        field_labels: &["Sent", "Date", "To", "Cc", "Bcc", "Subject", "Reply-To"],
        separators: &[
            r"(?i)^-{2,}\s*(?:original message|forwarded message)\s*-{2,}$",
            r"(?i)^begin forwarded message:$",
        ],
        closings: &[
            "Best regards",
            "Kind regards",
            "Warm regards",
            "Thanks and regards",
            "Regards",
            "Best wishes",
            "All the best",
            "Best",
            "Cheers",
            "Many thanks",
            "Thank you",
            "Thanks",
            "Yours sincerely",
            "Yours truly",
            "Sincerely",
        ],
        junk: &[
            r"(?i)^sent from my [\p{L}\p{N}][\p{L}\p{N}' ]{0,40}$",
            r"(?i)^sent from (?:outlook|mail|yahoo mail|gmail|proton mail)(?: for [\p{L}\p{N} ]{1,30})?$",
            r"(?i)^get outlook for (?:ios|android)$",
        ],
    },
    LanguageEntry {
        code: "de",
        name: "German",
        attribution_start: Some(r"^Am\s+\S"),
        attribution_cue: Some(r"\bschrieb\b.*:$"),
        sender_labels: &["Von"],
        field_labels: &["Gesendet", "Datum", "An", "Cc", "Betreff", "Antwort an"],
        separators: &[
            r"(?i)^-{2,}\s*(?:ursprüngliche nachricht|weitergeleitete nachricht)\s*-{2,}$",
            r"(?i)^anfang der weitergeleiteten nachricht:$",
        ],
        closings: &[
            "Mit freundlichen Grüßen",
            "Mit freundlichen Grüssen",
            "Freundliche Grüße",
            "Viele Grüße",
            "Beste Grüße",
            "Liebe Grüße",
            "Schöne Grüße",
            "Grüße",
            "Gruß",
            "MfG",
            "LG",
            "VG",
        ],
        junk: &[
            r"(?i)^von meinem [\p{L}\p{N} ]{1,40} gesendet$",
            r"(?i)^gesendet von meinem [\p{L}\p{N} ]{1,40}$",
        ],
    },
    LanguageEntry {
        code: "fr",
        name: "French",
        attribution_start: Some(r"^Le\s+\S"),
        attribution_cue: Some(r"\ba\s+écrit\s*:$"),
        sender_labels: &["De"],
        field_labels: &["Envoyé", "Date", "À", "A", "Cc", "Objet", "Répondre à"],
        separators: &[
            r"(?i)^-{2,}\s*(?:message d'origine|message transféré)\s*-{2,}$",
            r"(?i)^début du message (?:réexpédié|transféré)\s*:$",
        ],
        closings: &[
            "Bien cordialement",
            "Cordialement",
            "Bien à vous",
            "Salutations",
            "Amicalement",
            "Bonne journée",
            "Merci",
        ],
        junk: &[r"(?i)^envoyé de mon [\p{L}\p{N} ]{1,40}$"],
    },
    LanguageEntry {
        code: "es",
        name: "Spanish",
        attribution_start: Some(r"^El\s+\S"),
        attribution_cue: Some(r"\bescribió\s*:$"),
        sender_labels: &["De"],
        field_labels: &["Enviado", "Fecha", "Para", "CC", "Asunto"],
        separators: &[r"(?i)^-{2,}\s*(?:mensaje original|mensaje reenviado)\s*-{2,}$"],
        closings: &[
            "Un saludo",
            "Saludos cordiales",
            "Saludos",
            "Atentamente",
            "Cordialmente",
            "Un abrazo",
            "Gracias",
        ],
        junk: &[r"(?i)^enviado desde mi [\p{L}\p{N} ]{1,40}$"],
    },
    LanguageEntry {
        code: "it",
        name: "Italian",
        attribution_start: Some(r"^(?:Il|In data)\s+\S"),
        attribution_cue: Some(r"\bha\s+scritto\s*:$"),
        sender_labels: &["Da"],
        field_labels: &["Inviato", "Data", "A", "Cc", "Oggetto"],
        separators: &[r"(?i)^-{2,}\s*(?:messaggio originale|messaggio inoltrato)\s*-{2,}$"],
        closings: &[
            "Cordiali saluti",
            "Distinti saluti",
            "Un saluto",
            "Saluti",
            "Grazie",
        ],
        junk: &[r"(?i)^inviato da(?:l mio)? [\p{L}\p{N} ]{1,40}$"],
    },
    LanguageEntry {
        code: "nl",
        name: "Dutch",
        attribution_start: Some(r"^Op\s+\S"),
        attribution_cue: Some(r"\bschreef\b.*:$"),
        sender_labels: &["Van"],
        field_labels: &["Verzonden", "Datum", "Aan", "Cc", "Onderwerp"],
        separators: &[r"(?i)^-{2,}\s*(?:oorspronkelijk bericht|doorgestuurd bericht)\s*-{2,}$"],
        closings: &[
            "Met vriendelijke groeten",
            "Met vriendelijke groet",
            "Groeten",
            "Groet",
            "Bedankt",
        ],
        junk: &[r"(?i)^verzonden (?:vanaf|met) mijn [\p{L}\p{N} ]{1,40}$"],
    },
    LanguageEntry {
        code: "pl",
        name: "Polish",
        attribution_start: Some(r"^(?:Dnia|W dniu|Wiadomość napisana przez)\s+\S"),
        attribution_cue: Some(r"\bnapisa[łl](?:\(a\)|a)?\s*:$"),
        sender_labels: &["Od"],
        field_labels: &["Wysłano", "Data", "Do", "DW", "Temat"],
        separators: &[
            r"(?i)^-{2,}\s*(?:oryginalna wiadomość|wiadomość przekazana dalej)\s*-{2,}$",
        ],
        closings: &[
            "Serdecznie pozdrawiam",
            "Serdeczne pozdrowienia",
            "Pozdrawiam",
            "Pozdrowienia",
            "Z poważaniem",
            "Z powazaniem",
            "Dziękuję",
        ],
        junk: &[r"(?i)^wysłane z (?:mojego )?[\p{L}\p{N}' ]{1,40}$"],
    },
    LanguageEntry {
        code: "ja",
        name: "Japanese",
        attribution_start: Some(r"^\d{4}年\d{1,2}月\d{1,2}日"),
        attribution_cue: Some(r"(?:>|＞|書きました|wrote)\s*[:：]$"),
        sender_labels: &["差出人", "送信者"],
        field_labels: &["送信日時", "日付", "宛先", "件名", "CC"],
        separators: &[r"^-{2,}\s*(?:元のメッセージ|転送されたメッセージ|Original Message)\s*-{2,}$"],
        closings: &[
            "以上、よろしくお願いします",
            "よろしくお願いいたします",
            "よろしくお願い致します",
            "よろしくお願いします",
        ],
        junk: &[r"^(?:iPhone|iPad|Android|スマートフォン|携帯)から送信$"],
    },
    // Tobit David mail client: a banner line followed by a German field block.
    LanguageEntry {
        code: "david",
        name: "Tobit David",
        attribution_start: None,
        attribution_cue: None,
        sender_labels: &["Von"],
        field_labels: &["An", "Cc", "Kopie", "Gesendet", "Datum", "Betreff"],
        separators: &[r"(?i)^original message processed by david®?:?$"],
        closings: &[],
        junk: &[],
    },
];

// English header lines mail clients emit in any locale; consulted after the
// selected languages.
static COMMON_HEADERS: LanguageEntry = LanguageEntry {
    code: "common",
    name: "Language independent",
    attribution_start: None,
    attribution_cue: Some(r"\bwrote\s*:$"),
    sender_labels: &["From"],
    field_labels: &["Sent", "Date", "To", "Cc", "Subject", "Reply-To"],
    separators: &[r"(?i)^-{2,}\s*(?:original message|forwarded message)\s*-{2,}$"],
    closings: &[],
    junk: &[],
};

static REGISTRY: LazyLock<Vec<RuleBundle>> =
    LazyLock::new(|| LANGUAGES.iter().map(RuleBundle::compile).collect());

static COMMON: LazyLock<RuleBundle> = LazyLock::new(|| RuleBundle::compile(&COMMON_HEADERS));

/// Attribution header patterns ("On ... wrote:")
///
/// Without a start pattern only the bare cue form ("Bob <bob@x> wrote:") is
/// recognized.
#[derive(Debug)]
pub(crate) struct Attribution {
    pub(crate) start: Option<Regex>,
    pub(crate) cue: Regex,
}

/// Compiled header, signature and junk matchers for one language
#[derive(Debug)]
pub struct RuleBundle {
    code: &'static str,
    name: &'static str,
    attribution: Option<Attribution>,
    fields: Option<Regex>,
    sender: Option<Regex>,
    separators: Option<Regex>,
    closings: Option<Regex>,
    junk: Option<Regex>,
}

impl RuleBundle {
    fn compile(entry: &LanguageEntry) -> Self {
        let all_labels = [entry.sender_labels, entry.field_labels].concat();

        Self {
            code: entry.code,
            name: entry.name,
            attribution: entry.attribution_cue.map(|cue| Attribution {
                start: entry.attribution_start.map(|start| Regex::new(start).unwrap()),
                cue: Regex::new(cue).unwrap(),
            }),
            fields: labels(&all_labels),
            sender: labels(entry.sender_labels),
            separators: alternation(entry.separators),
            closings: phrases(entry.closings),
            junk: alternation(entry.junk),
        }
    }

    /// Language code, e.g. `"en"`
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Human readable language name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Check whether a line (without quote markers) may open an attribution header
    #[must_use]
    pub fn is_header_start(&self, line: &str) -> bool {
        self.attribution
            .as_ref()
            .is_some_and(|a| matches(a.start.as_ref(), line) || a.cue.is_match(line))
            || self.is_field(line)
            || self.is_separator(line)
    }

    /// Check whether a line is a closing salutation ("Best regards,")
    #[must_use]
    pub fn is_closing(&self, line: &str) -> bool {
        matches(self.closings.as_ref(), line)
    }

    /// Check whether a line is device or client boilerplate ("Sent from my iPhone")
    #[must_use]
    pub fn is_junk(&self, line: &str) -> bool {
        matches(self.junk.as_ref(), line)
    }

    pub(crate) const fn attribution(&self) -> Option<&Attribution> {
        self.attribution.as_ref()
    }

    pub(crate) fn is_field(&self, line: &str) -> bool {
        matches(self.fields.as_ref(), line)
    }

    pub(crate) fn is_sender_field(&self, line: &str) -> bool {
        matches(self.sender.as_ref(), line)
    }

    pub(crate) fn is_separator(&self, line: &str) -> bool {
        matches(self.separators.as_ref(), line)
    }
}

impl fmt::Display for RuleBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

fn matches(re: Option<&Regex>, line: &str) -> bool {
    re.is_some_and(|re| re.is_match(line))
}

fn alternation(patterns: &[&str]) -> Option<Regex> {
    if patterns.is_empty() {
        return None;
    }
    let joined = patterns
        .iter()
        .map(|p| format!("(?:{p})"))
        .collect::<Vec<_>>()
        .join("|");
    Some(Regex::new(&joined).unwrap())
}

/// "Label:" at the start of a line, tolerating Gmail's `*Label:*` markup
fn labels(labels: &[&str]) -> Option<Regex> {
    if labels.is_empty() {
        return None;
    }
    let joined = labels
        .iter()
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|");
    Some(Regex::new(&format!(r"(?i)^\*?(?:{joined})\s*[:：]")).unwrap())
}

/// A whole line consisting of one phrase plus optional trailing punctuation
fn phrases(phrases: &[&str]) -> Option<Regex> {
    if phrases.is_empty() {
        return None;
    }
    let joined = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Some(Regex::new(&format!(r"(?i)^(?:{joined})\s*[,.!、。！]*$")).unwrap())
}

/// Look up the rule bundle for a language code
///
/// Codes are matched case-insensitively. A region-qualified code such as
/// `de-AT` falls back to its primary subtag when no exact entry exists.
#[must_use]
pub fn bundle_for(code: &str) -> Option<&'static RuleBundle> {
    let code = code.trim().to_lowercase();
    let registry: &'static [RuleBundle] = &REGISTRY;

    registry.iter().find(|b| b.code == code).or_else(|| {
        let primary = code.split(['-', '_']).next()?;
        registry.iter().find(|b| b.code == primary)
    })
}

/// Codes of all built-in languages, in registry order
pub fn available_languages() -> impl Iterator<Item = &'static str> {
    LANGUAGES.iter().map(|entry| entry.code)
}

/// The ordered bundles a parser consults; first match wins
#[derive(Debug, Clone)]
pub(crate) struct RuleSet {
    bundles: Vec<&'static RuleBundle>,
}

impl RuleSet {
    pub(crate) const fn new(bundles: Vec<&'static RuleBundle>) -> Self {
        Self { bundles }
    }

    /// Bundles consulted for headers: the selected languages in order, then
    /// the language independent header rules
    pub(crate) fn header_bundles(&self) -> impl Iterator<Item = &'static RuleBundle> + '_ {
        self.bundles.iter().copied().chain(std::iter::once(&*COMMON))
    }

    pub(crate) fn codes(&self) -> Vec<String> {
        self.bundles.iter().map(|b| b.code.to_string()).collect()
    }

    pub(crate) fn is_header_start(&self, line: &str) -> bool {
        self.header_bundles().any(|b| b.is_header_start(line))
    }

    pub(crate) fn is_closing(&self, line: &str) -> bool {
        self.bundles.iter().any(|b| b.is_closing(line))
    }

    pub(crate) fn is_junk(&self, line: &str) -> bool {
        self.bundles.iter().any(|b| b.is_junk(line))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(bundle_for(DEFAULT_LANGUAGE).into_iter().collect())
    }
}
