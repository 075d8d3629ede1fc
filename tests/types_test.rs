use email_reply::*;

const THREAD: &str = concat!(
    "Sounds good.\n",
    "\n",
    "--\n",
    "Bob\n",
    "\n",
    "On Mon, Jan 3, 2011, Alice <alice@example.com> wrote:\n",
    "> Lunch on Friday?\n",
);

// --- Span ---

#[test]
fn test_span_basics() {
    let span = Span::new(3, 7);
    assert_eq!(span.len(), 4);
    assert!(!span.is_empty());
    assert_eq!(span.range(), 3..7);
    assert!(Span::default().is_empty());
}

#[test]
fn test_reversed_span_is_empty() {
    let span = Span::new(7, 3);
    assert_eq!(span.len(), 0);
    assert!(span.is_empty());
}

// --- Fragment ---

#[test]
fn test_fragment_spans_partition_content() {
    let email = ReplyParser::default().read(THREAD);

    for fragment in &email {
        let headers = fragment.header_span();
        let body = fragment.body_span();
        let signatures = fragment.signature_span();

        assert_eq!(headers.start, 0);
        assert_eq!(headers.end, body.start);
        assert_eq!(body.end, signatures.start);
        assert_eq!(signatures.end, fragment.content().len());
    }
}

#[test]
fn test_fragment_text_views() {
    let email = ReplyParser::default().read(THREAD);
    let first = &email.fragments()[0];
    let second = &email.fragments()[1];

    assert_eq!(first.content(), "Sounds good.\n\n--\nBob\n\n");
    assert_eq!(first.body(), "Sounds good.");
    assert_eq!(first.signatures(), "--\nBob");
    assert_eq!(first.headers(), "");
    assert!(first.has_signatures());
    assert!(!first.has_headers());

    assert_eq!(
        second.headers(),
        "On Mon, Jan 3, 2011, Alice <alice@example.com> wrote:"
    );
    assert_eq!(second.body(), "> Lunch on Friday?");
    assert_eq!(second.signatures(), "");
}

#[test]
fn test_fragment_offsets() {
    let email = ReplyParser::default().read(THREAD);

    for fragment in email.fragments() {
        let end = fragment.offset() + fragment.content().len();
        assert_eq!(&email.text()[fragment.offset()..end], fragment.content());
    }
    assert_eq!(email.fragments()[1].offset(), "Sounds good.\n\n--\nBob\n\n".len());
}

#[test]
fn test_fragment_display_is_body() {
    let email = ReplyParser::default().read(THREAD);
    assert_eq!(email.fragments()[0].to_string(), "Sounds good.");
}

// --- EmailMessage ---

#[test]
fn test_message_views() {
    let email = ReplyParser::default().read(THREAD);

    assert_eq!(email.len(), 2);
    assert!(!email.is_empty());
    assert_eq!(email.replies(), email.fragments());
    assert_eq!(email.latest_reply(), email.fragments()[0].body());
    assert_eq!(email.languages().to_vec(), vec!["en".to_string()]);
    assert_eq!(email.text(), THREAD);
}

#[test]
fn test_into_fragments() {
    let fragments = ReplyParser::default().read(THREAD).into_fragments();

    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[1].index(), 1);
}

#[test]
fn test_message_serializes_to_json() {
    let email = ReplyParser::default().read(THREAD);
    let json = serde_json::to_value(&email).unwrap();

    assert_eq!(json["languages"], serde_json::json!(["en"]));
    assert_eq!(json["fragments"][0]["quoted"], false);
    assert_eq!(json["fragments"][1]["headers"]["start"], 0);

    let back: EmailMessage = serde_json::from_value(json).unwrap();
    assert_eq!(back, email);
}

#[test]
fn test_fragment_from_json() {
    let fragment: Fragment = serde_json::from_str(
        r#"{"index":0,"offset":0,"content":"hi\n--\nBob","headers":{"start":0,"end":0},"signatures":{"start":3,"end":9},"quoted":false,"depth":0}"#,
    )
    .unwrap();

    assert_eq!(fragment.body(), "hi");
    assert_eq!(fragment.signatures(), "--\nBob");
}

#[test]
fn test_fragment_rejects_spans_past_content() {
    let result = serde_json::from_str::<Fragment>(
        r#"{"index":0,"offset":0,"content":"hi","headers":{"start":0,"end":10},"signatures":{"start":2,"end":2},"quoted":false,"depth":0}"#,
    );

    let err = result.unwrap_err();
    assert!(err.to_string().contains("do not partition 2 bytes"));
}

#[test]
fn test_fragment_rejects_overlapping_spans() {
    let result = serde_json::from_str::<Fragment>(
        r#"{"index":0,"offset":0,"content":"hello","headers":{"start":0,"end":4},"signatures":{"start":2,"end":5},"quoted":false,"depth":0}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_fragment_rejects_split_character() {
    let result = serde_json::from_str::<Fragment>(
        r#"{"index":0,"offset":0,"content":"été","headers":{"start":0,"end":1},"signatures":{"start":5,"end":5},"quoted":false,"depth":0}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_message_rejects_invalid_fragment() {
    let result = serde_json::from_str::<EmailMessage>(
        r#"{"text":"hi","languages":["en"],"fragments":[{"index":0,"offset":0,"content":"hi","headers":{"start":0,"end":0},"signatures":{"start":0,"end":1},"quoted":false,"depth":0}]}"#,
    );
    assert!(result.is_err());
}

// --- ParserConfig ---

#[test]
fn test_config_defaults() {
    let config = ParserConfig::default();

    assert!(config.languages.is_empty());
    assert_eq!(config.default_language.as_deref(), Some(DEFAULT_LANGUAGE));
    assert!(!config.unwrap_soft_breaks);
}

#[test]
fn test_config_from_json() {
    let config: ParserConfig =
        serde_json::from_str(r#"{"languages": ["de", "en"], "unwrap_soft_breaks": true}"#).unwrap();

    assert_eq!(config.languages, vec!["de", "en"]);
    assert_eq!(config.default_language.as_deref(), Some("en"));
    assert!(config.unwrap_soft_breaks);

    let parser = ReplyParser::new(config).unwrap();
    assert_eq!(parser.languages(), vec!["de".to_string(), "en".to_string()]);
}

#[test]
fn test_config_null_default_language() {
    let config: ParserConfig =
        serde_json::from_str(r#"{"languages": ["xx"], "default_language": null}"#).unwrap();

    assert!(config.default_language.is_none());
    assert!(matches!(
        ReplyParser::new(config),
        Err(ParseError::NoLanguage { .. })
    ));
}

// --- ParseError ---

#[test]
fn test_error_display() {
    let err = ParseError::UnknownDefaultLanguage("xx".into());
    assert_eq!(err.to_string(), "Unknown default language: xx");

    let err = ParseError::NoLanguage {
        requested: vec!["xx".into()],
    };
    assert!(err.to_string().contains("\"xx\""));

    let err = ParseError::InvalidSpans {
        headers: Span::new(0, 4),
        signatures: Span::new(2, 5),
        len: 5,
    };
    assert!(err.to_string().contains("5 bytes"));
}

// --- Normalization ---

#[test]
fn test_normalize_public() {
    assert_eq!(normalize("a \r\nb\t\r\n"), "a\nb\n");
    assert_eq!(quote_depth("> > deep"), 2);
    assert_eq!(quote_depth(">>> deeper"), 3);
    assert_eq!(quote_depth("flat > text"), 0);
}

#[test]
fn test_parser_normalize_matches_message_text() {
    let parser = ReplyParser::default();
    let raw = "Hi  \r\n\r\n> quoted \r\n";

    assert_eq!(parser.normalize(raw), parser.read(raw).text());
}
