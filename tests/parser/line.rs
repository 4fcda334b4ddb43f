//! Single-line parsing tests

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use twtxt::unstyle::strip_markup;
use twtxt::{
    FixedClock, MemorySink, ParserConfig, Source, TweetParser, TwtxtError, parse_iso8601,
};

fn source() -> Arc<Source> {
    Arc::new(Source::new("alice", "https://example.com/twtxt.txt"))
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap()
}

fn parser() -> (TweetParser, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let parser = TweetParser::new()
        .with_sink(sink.clone())
        .with_clock(FixedClock(now()));
    (parser, sink)
}

#[test]
fn test_hello_world() {
    let (parser, sink) = parser();
    let src = source();

    let tweet = parser
        .parse_tweet("2016-12-25T12:00:00+00:00\tHello world", &src)
        .unwrap()
        .expect("line should produce a tweet");

    assert_eq!(tweet.text, "Hello world");
    assert_eq!(
        tweet.created_at,
        Utc.with_ymd_and_hms(2016, 12, 25, 12, 0, 0).unwrap()
    );
    assert_eq!(tweet.source.nick, "alice");
    assert_eq!(tweet.source.url, "https://example.com/twtxt.txt");
    assert!(sink.is_empty());
}

#[test]
fn test_text_is_trimmed_stripped_markup() {
    let (parser, _) = parser();
    let src = source();

    for raw_text in ["  spaced out  ", "\x1b[31mred\x1b[0m alert", "\ttabbed\t", "plain"] {
        let line = format!("2016-12-25T12:00:00Z\t{}", raw_text);
        let tweet = parser.parse_tweet(&line, &src).unwrap().unwrap();
        assert_eq!(tweet.text, strip_markup(raw_text).trim(), "{:?}", raw_text);
        assert_eq!(strip_markup(&tweet.text), tweet.text);
    }
}

#[test]
fn test_timestamp_matches_normalizer() {
    let (parser, _) = parser();
    let src = source();

    for raw_ts in ["2016-12-25T12:00:00+00:00", "2016-12-25 08:15", "2016-12-25T12:00:00-03:00"] {
        let line = format!("{}\tx", raw_ts);
        let tweet = parser.parse_tweet(&line, &src).unwrap().unwrap();
        let expected = parse_iso8601(raw_ts).unwrap();
        assert_eq!(tweet.created_at, expected);
        assert_eq!(tweet.created_at.offset(), expected.offset());
    }
}

#[test]
fn test_empty_message_is_allowed() {
    let (parser, _) = parser();
    let tweet = parser
        .parse_tweet("2016-12-25T12:00:00Z\t", &source())
        .unwrap()
        .unwrap();
    assert_eq!(tweet.text, "");
}

#[test]
fn test_comments_and_blank_lines_are_ignored() {
    let (parser, sink) = parser();
    let src = source();
    for raw in ["", "#", "# follow = bob https://example.org/twtxt.txt", "#\t"] {
        assert!(parser.parse_tweet(raw, &src).unwrap().is_none(), "{:?}", raw);
    }
    assert!(sink.is_empty());
}

#[test]
fn test_whitespace_only_line_is_malformed() {
    let (parser, _) = parser();
    assert!(matches!(
        parser.parse_tweet("   ", &source()),
        Err(TwtxtError::MalformedLine(_))
    ));
}

#[test]
fn test_missing_tab_is_malformed_line() {
    let (parser, _) = parser();
    for raw in ["nouse-no-tab", "2016-12-25T12:00:00Z Hello", "2016-12-25T12:00:00Z"] {
        assert!(
            matches!(parser.parse_tweet(raw, &source()), Err(TwtxtError::MalformedLine(_))),
            "{:?}",
            raw
        );
    }
}

#[test]
fn test_bad_timestamp_is_malformed_timestamp() {
    let (parser, _) = parser();
    let err = parser.parse_tweet("not-a-date\tHi", &source()).unwrap_err();
    assert!(matches!(err, TwtxtError::MalformedTimestamp { .. }));
}

#[test]
fn test_overflowing_timestamp_is_out_of_range() {
    let (parser, _) = parser();
    let err = parser
        .parse_tweet("99999-12-25T12:00:00Z\tHi", &source())
        .unwrap_err();
    assert!(matches!(err, TwtxtError::TimestampOutOfRange { .. }));
}

#[test]
fn test_future_tweet_is_still_returned() {
    let (parser, sink) = parser();
    let tweet = parser
        .parse_tweet("2017-01-01T02:00:00Z\tsoon", &source())
        .unwrap();
    assert_eq!(tweet.map(|t| t.text), Some("soon".to_string()));
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_explicit_reference_time_overrides_clock() {
    let (parser, sink) = parser();
    let later = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
    parser
        .parse_tweet_at("2017-06-01T00:00:00Z\tfine by now", &source(), later)
        .unwrap();
    assert!(sink.is_empty());
}

#[test]
fn test_quiet_config_suppresses_future_warning() {
    let (parser, sink) = parser();
    let parser = parser.with_config(ParserConfig::quiet());
    assert_eq!(parser.config(), &ParserConfig::quiet());
    parser
        .parse_tweet("2030-01-01T00:00:00Z\tlater", &source())
        .unwrap();
    assert!(sink.is_empty());
}
