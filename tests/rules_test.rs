use email_reply::*;

#[test]
fn test_bundle_lookup() {
    assert_eq!(bundle_for("en").map(RuleBundle::code), Some("en"));
    assert_eq!(bundle_for("EN").map(RuleBundle::code), Some("en"));
    assert_eq!(bundle_for(" pl ").map(RuleBundle::code), Some("pl"));
    assert!(bundle_for("xx").is_none());
    assert!(bundle_for("").is_none());
}

#[test]
fn test_bundle_lookup_region_fallback() {
    assert_eq!(bundle_for("de-AT").map(RuleBundle::code), Some("de"));
    assert!(bundle_for("pt_BR").is_none());
    assert_eq!(bundle_for("fr_CA").map(RuleBundle::code), Some("fr"));
}

#[test]
fn test_available_languages() {
    let codes: Vec<_> = available_languages().collect();

    for code in ["en", "de", "fr", "es", "it", "nl", "pl", "ja", "david"] {
        assert!(codes.contains(&code), "missing {code}");
        assert!(bundle_for(code).is_some());
    }
    assert_eq!(codes[0], DEFAULT_LANGUAGE);
}

#[test]
fn test_bundle_display() {
    let bundle = bundle_for("de").unwrap();
    assert_eq!(bundle.name(), "German");
    assert_eq!(bundle.to_string(), "German (de)");
}

#[test]
fn test_header_start() {
    let en = bundle_for("en").unwrap();
    assert!(en.is_header_start("On Mon, Jan 3, 2011 at 10:15 AM, Bob <bob@example.com> wrote:"));
    assert!(en.is_header_start("From: Bob <bob@example.com>"));
    assert!(en.is_header_start("*From:* Bob"));
    assert!(en.is_header_start("-----Original Message-----"));
    assert!(!en.is_header_start("Hello there"));

    let de = bundle_for("de").unwrap();
    assert!(de.is_header_start("Am 03.01.2011 um 10:15 schrieb Bob:"));
    assert!(de.is_header_start("Von: Bob"));
    assert!(!de.is_header_start("From: Bob"));

    let david = bundle_for("david").unwrap();
    assert!(david.is_header_start("Original Message processed by david®"));
}

#[test]
fn test_closing() {
    let en = bundle_for("en").unwrap();
    assert!(en.is_closing("Best regards,"));
    assert!(en.is_closing("thanks!"));
    assert!(en.is_closing("Cheers"));
    assert!(!en.is_closing("Thanks for the quick reply."));

    let pl = bundle_for("pl").unwrap();
    assert!(pl.is_closing("Pozdrawiam,"));
    assert!(pl.is_closing("Z poważaniem"));

    assert!(!bundle_for("david").unwrap().is_closing("Thanks"));
}

#[test]
fn test_junk() {
    let en = bundle_for("en").unwrap();
    assert!(en.is_junk("Sent from my iPhone"));
    assert!(en.is_junk("Sent from my BlackBerry Wireless Handheld"));
    assert!(en.is_junk("Get Outlook for iOS"));
    assert!(!en.is_junk("I sent it from my iPhone yesterday"));

    let de = bundle_for("de").unwrap();
    assert!(de.is_junk("Von meinem iPhone gesendet"));

    let ja = bundle_for("ja").unwrap();
    assert!(ja.is_junk("iPhoneから送信"));
}
