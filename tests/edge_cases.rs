//! Edge case tests for chatstats
//!
//! These tests cover boundary conditions of extraction, tokenizing and
//! ranking that regular unit and integration tests don't reach.

use chatstats::config::{AnalysisConfig, HtmlTemplate, JsonConfig, TimeBasis};
use chatstats::core::{FrequencyTable, SortBy, aggregate};
use chatstats::parser::{ExportFormat, Parser, SkipReason, create_parser};
use chatstats::parsers::{HtmlParser, JsonParser};
use chatstats::parsing::{HtmlRules, fix_mojibake_encoding, parse_html_document};
use chatstats::text::{StopWordMatch, StopWords, tokenize};
use chatstats::{ChatstatsError, Message};
use chrono::NaiveDate;

fn utc_json() -> JsonParser {
    JsonParser::with_config(JsonConfig::new().with_time_basis(TimeBasis::Utc))
}

fn rich() -> HtmlParser {
    HtmlParser::with_template(ExportFormat::HtmlRich, HtmlTemplate::rich()).unwrap()
}

fn simple() -> HtmlParser {
    HtmlParser::with_template(ExportFormat::HtmlSimple, HtmlTemplate::simple()).unwrap()
}

fn tokens(text: &str, stop: &StopWords) -> Vec<String> {
    tokenize(text, stop).collect()
}

// =========================================================================
// Tokenizer
// =========================================================================

#[test]
fn test_emoji_and_punctuation_only() {
    let stop = StopWords::empty();
    assert!(tokens("🎉🔥💀 ... !!! —", &stop).is_empty());
}

#[test]
fn test_foreign_scripts_produce_no_tokens() {
    let stop = StopWords::empty();
    assert!(tokens("こんにちは 你好 مرحبا", &stop).is_empty());
    assert_eq!(tokens("Hello 你好 Привет", &stop), ["hello", "привет"]);
}

#[test]
fn test_yo_is_a_word_character() {
    let stop = StopWords::empty();
    assert_eq!(tokens("ЁЛКА ёжик", &stop), ["ёлка", "ёжик"]);
}

#[test]
fn test_longest_run_per_fragment() {
    let stop = StopWords::empty();
    // Only one token per whitespace fragment
    assert_eq!(tokens("e-mail foo.bar.bazz", &stop), ["mail", "bazz"]);
    // Ties keep the leftmost run
    assert_eq!(tokens("ab-cd", &stop), ["ab"]);
}

#[test]
fn test_punctuated_stop_word_is_dropped_in_exact_mode() {
    let stop = StopWords::from_text("и");
    assert_eq!(tokens("кошки и, собаки", &stop), ["кошки", "собаки"]);
}

#[test]
fn test_substring_mode_drops_containing_fragments() {
    let stop = StopWords::from_text("и\nв\nпривет").with_match(StopWordMatch::Substring);
    // "при" occurs inside the list text
    assert_eq!(tokens("при привет мир", &stop), ["мир"]);
}

#[test]
fn test_whitespace_variants() {
    let stop = StopWords::empty();
    assert_eq!(tokens("a\tb\nc\r\nd\u{00A0}e", &stop), ["a", "b", "c", "d", "e"]);
}

// =========================================================================
// HTML extraction
// =========================================================================

#[test]
fn test_html_without_containers_is_parse_error() {
    let err = rich().parse_str("<html><body><p>nothing</p></body></html>").unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_html_unclosed_container() {
    let html = r#"<div class="msg_body">первое<div class="msg_body">второе"#;
    let parsed = simple().parse_str(html).unwrap();
    assert_eq!(parsed.messages.len(), 2);
    assert_eq!(parsed.messages[1].text(), "второе");
}

#[test]
fn test_html_invalid_permalink_date_is_malformed() {
    let html = r#"<div class="msg_item" id="msg1"><div class="from"><b>Ann</b> <a href="/m">2019.13.45 99:00:00</a></div><div class="msg_body">text</div></div>"#;
    let parsed = rich().parse_str(html).unwrap();
    assert!(parsed.messages.is_empty());
    assert_eq!(parsed.skipped.malformed, 1);
}

#[test]
fn test_html_date_inside_body_is_not_a_timestamp() {
    let html = r#"<div class="msg_item" id="msg1"><div class="from"><b>Ann</b></div><div class="msg_body"><a href="/x">2019.05.16 10:00:00</a></div></div>"#;
    let parsed = rich().parse_str(html).unwrap();
    assert_eq!(parsed.skipped.malformed, 1);
}

#[test]
fn test_html_missing_author_is_malformed() {
    let html = r#"<div class="msg_item" id="msg1"><div class="from"><a href="/m">2019.05.16 10:00:00</a></div><div class="msg_body">text</div></div>"#;
    let parsed = rich().parse_str(html).unwrap();
    assert_eq!(parsed.skipped.malformed, 1);
}

#[test]
fn test_html_entities_and_markup_in_body() {
    let html = r#"<div class="msg_body">&lt;b&gt; &amp; <i>курсив</i> &#1087;&#x440;&#1080; &nbsp;</div>"#;
    let parsed = simple().parse_str(html).unwrap();
    assert_eq!(parsed.messages[0].text(), "<b> & курсив при");
}

#[test]
fn test_html_emoji_with_text_keeps_text() {
    let html = r#"<div class="msg_body">ура <img class="emoji" alt="🎉"></div>"#;
    let parsed = simple().parse_str(html).unwrap();
    assert_eq!(parsed.messages[0].text(), "ура");
}

#[test]
fn test_html_custom_template() {
    let template = HtmlTemplate::rich()
        .with_container_class("message")
        .with_body_class("text")
        .without_id_pattern();
    let rules = HtmlRules::compile(template).unwrap();
    let html = r#"<div class="message"><div class="from"><b>Ann</b> <a>2020.02.29 12:00:00</a></div><div class="text">leap</div></div>"#;

    let parsed = parse_html_document(html, &rules).unwrap();
    assert_eq!(parsed.messages[0].date_key().as_deref(), Some("29/02/20"));
}

#[test]
fn test_html_invalid_id_pattern() {
    let template = HtmlTemplate::rich().with_id_pattern("msg(");
    let err = HtmlRules::compile(template).unwrap_err();
    assert!(matches!(err, ChatstatsError::InvalidPattern { .. }));
}

// =========================================================================
// JSON extraction
// =========================================================================

#[test]
fn test_json_empty_array() {
    let parsed = utc_json().parse_str("[]").unwrap();
    assert!(parsed.messages.is_empty());
    assert_eq!(parsed.skipped.total(), 0);
}

#[test]
fn test_json_object_without_messages_is_parse_error() {
    let err = utc_json().parse_str(r#"{"participants": []}"#).unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_json_bad_record_is_skipped() {
    let json = r#"[
        42,
        {"sender_name": "Ann", "timestamp_ms": "not a number", "content": "x"},
        {"sender_name": "Ann", "timestamp_ms": 0, "content": "ok"}
    ]"#;
    let parsed = utc_json().parse_str(json).unwrap();
    assert_eq!(parsed.messages.len(), 1);
    assert_eq!(parsed.skipped.malformed, 2);
    assert_eq!(parsed.messages[0].date_key().as_deref(), Some("01/01/70"));
}

#[test]
fn test_json_missing_sender_and_timestamp() {
    let json = r#"[
        {"timestamp_ms": 0, "content": "no sender"},
        {"sender_name": "Ann", "content": "no time"},
        {"sender_name": "  ", "timestamp_ms": 0, "content": "blank sender"}
    ]"#;
    let parsed = utc_json().parse_str(json).unwrap();
    assert!(parsed.messages.is_empty());
    assert_eq!(parsed.skipped.malformed, 3);
}

#[test]
fn test_json_blank_text_with_share_is_media() {
    let json = r#"[{"sender_name": "Ann", "timestamp_ms": 0, "content": "  ", "share": {"link": "https://x"}}]"#;
    let parsed = utc_json().parse_str(json).unwrap();
    assert_eq!(parsed.skipped.media, 1);
}

#[test]
fn test_json_formatted_text_array() {
    let json = r#"[{"from": "Ann", "timestamp_ms": 0, "text": ["see ", {"type": "link", "text": "example"}, "!"]}]"#;
    let parsed = utc_json().parse_str(json).unwrap();
    assert_eq!(parsed.messages[0].text(), "see example!");
}

#[test]
fn test_mojibake_leaves_non_utf8_bytes_alone() {
    // Latin-1 text that is not a UTF-8 byte sequence
    assert_eq!(fix_mojibake_encoding("café"), "café");
    assert_eq!(fix_mojibake_encoding(""), "");
}

#[test]
fn test_json_hour_boundaries_utc() {
    let json = r#"[
        {"sender_name": "Ann", "timestamp_ms": 1577836800000, "content": "midnight"},
        {"sender_name": "Ann", "timestamp_ms": 1577923199000, "content": "last second"}
    ]"#;
    let parsed = utc_json().parse_str(json).unwrap();
    assert_eq!(parsed.messages[0].hour(), Some(0));
    assert_eq!(parsed.messages[1].hour(), Some(23));
    assert_eq!(parsed.messages[1].date_key().as_deref(), Some("01/01/20"));
}

// =========================================================================
// Detection and configuration
// =========================================================================

#[test]
fn test_detect_unknown_extension() {
    let err = ExportFormat::detect("chat.txt", "whatever").unwrap_err();
    assert!(err.is_unsupported_format());
}

#[test]
fn test_detect_is_case_insensitive() {
    assert_eq!(ExportFormat::detect("DUMP.JSON", "[]").unwrap(), ExportFormat::Json);
    assert_eq!(
        ExportFormat::detect("old.HTM", "<div class=\"msg_body\">x</div>").unwrap(),
        ExportFormat::HtmlSimple
    );
}

#[test]
fn test_missing_stopwords_is_configuration_error() {
    let err = StopWords::load("/definitely/not/here/stopwords.txt").unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("stopwords.txt"));
}

#[test]
fn test_create_parser_for_every_format() {
    let config = AnalysisConfig::default();
    for format in ExportFormat::all() {
        let parser = create_parser(*format, &config).unwrap();
        assert_eq!(parser.format(), *format);
    }
}

// =========================================================================
// Ranking
// =========================================================================

#[test]
fn test_top_zero_is_empty() {
    let table: FrequencyTable<String> = ["a", "b"].into_iter().map(String::from).collect();
    assert!(table.rank(SortBy::CountDesc, Some(0)).is_empty());
}

#[test]
fn test_top_larger_than_table() {
    let table: FrequencyTable<String> = ["a", "b", "a"].into_iter().map(String::from).collect();
    let view = table.rank(SortBy::CountDesc, Some(100));
    assert_eq!(view.entries(), &[("a".to_string(), 2), ("b".to_string(), 1)]);
}

#[test]
fn test_date_keys_sort_lexicographically() {
    let at = |y: i32, m: u32, d: u32| {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    };
    let messages = vec![
        Message::new("x").with_timestamp(at(2019, 5, 16)),
        Message::new("x").with_timestamp(at(2020, 1, 2)),
        Message::new("x").with_timestamp(at(2018, 12, 31)),
    ];
    let stats = aggregate(&messages, &StopWords::empty());
    let view = stats.dates.rank(SortBy::KeyAsc, None);
    assert_eq!(view.labels(), ["02/01/20", "16/05/19", "31/12/18"]);
}

#[test]
fn test_skip_reason_display() {
    assert_eq!(SkipReason::Media.to_string(), "media");
    assert!(SkipReason::Malformed("sender").to_string().contains("sender"));
}
