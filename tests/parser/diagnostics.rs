//! Diagnostics tests: what gets reported, at which level, through which sink

use chrono::{TimeZone, Utc};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::Level;
use twtxt::{
    Diagnostic, DiagnosticSink, FixedClock, MemorySink, ParserConfig, Source, TracingSink,
    TweetParser,
};

fn source() -> Arc<Source> {
    Arc::new(Source::new("alice", "https://example.com/twtxt.txt"))
}

/// `io::Write` handle into a shared buffer, for capturing formatted logs
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_tracing_sink_logs_at_expected_levels() {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(Level::TRACE)
        .finish();

    let now = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
    let parser = TweetParser::new()
        .with_sink(TracingSink)
        .with_clock(FixedClock(now));

    tracing::subscriber::with_default(subscriber, || {
        parser.parse_tweets(
            ["no tab", "2017-01-02T00:00:00Z\ttomorrow"],
            &source(),
        );
    });

    let logs = buffer.contents();
    assert!(
        logs.contains("ERROR") && logs.contains("https://example.com/twtxt.txt - Malformed line"),
        "{}",
        logs
    );
    assert!(
        logs.contains("WARN") && logs.contains("is from the future"),
        "{}",
        logs
    );
    assert!(
        logs.contains("https://example.com/twtxt.txt - 1 tweets, 1 errors"),
        "{}",
        logs
    );
}

#[test]
fn test_line_error_carries_url_and_cause() {
    let sink = Arc::new(MemorySink::new());
    let parser = TweetParser::new().with_sink(sink.clone());

    parser.parse_tweets(["not-a-date\tHi"], &source());

    let diagnostics = sink.take();
    let Diagnostic::LineError { url, error } = &diagnostics[0] else {
        panic!("expected a line error, got {:?}", diagnostics[0]);
    };
    assert_eq!(url, "https://example.com/twtxt.txt");
    assert!(error.is_timestamp_error());
    assert_eq!(diagnostics[0].level(), Level::ERROR);
    assert!(diagnostics[0].to_string().contains("not-a-date"));
}

#[test]
fn test_summary_can_be_disabled() {
    let sink = Arc::new(MemorySink::new());
    let parser = TweetParser::new()
        .with_sink(sink.clone())
        .with_config(ParserConfig {
            report_summary: false,
            ..ParserConfig::default()
        });

    let feed = parser.parse_feed(["bad", "worse"], &source());
    assert_eq!(feed.errors, 2);

    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(
        diagnostics
            .iter()
            .all(|d| matches!(d, Diagnostic::LineError { .. }))
    );
}

#[test]
fn test_future_tweet_is_a_warning_not_an_error() {
    let sink = Arc::new(MemorySink::new());
    let now = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
    let parser = TweetParser::new()
        .with_sink(sink.clone())
        .with_clock(FixedClock(now));

    let feed = parser.parse_feed(["2019-03-01T00:00:00Z\tway ahead"], &source());
    assert_eq!(feed.tweets.len(), 1);
    assert_eq!(feed.errors, 0);

    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].level(), Level::WARN);
    assert_eq!(
        diagnostics[0].to_string(),
        "Tweet by alice@https://example.com/twtxt.txt is from the future: \"2019-03-01T00:00:00Z\" 2 years from now"
    );
}

/// Sinks are plain trait objects; anything `Send + Sync` can receive diagnostics
#[test]
fn test_custom_sink() {
    #[derive(Default)]
    struct CountingSink {
        errors: Mutex<usize>,
    }

    impl DiagnosticSink for CountingSink {
        fn emit(&self, diagnostic: &Diagnostic) {
            if diagnostic.level() == Level::ERROR {
                *self.errors.lock().unwrap() += 1;
            }
        }
    }

    let sink = Arc::new(CountingSink::default());
    let parser = TweetParser::new().with_sink(sink.clone());
    parser.parse_tweets(["a", "b", "2016-01-01\tc"], &source());

    // two line errors plus the summary
    assert_eq!(*sink.errors.lock().unwrap(), 3);
}

#[cfg(feature = "serde")]
#[test]
fn test_config_deserializes_with_defaults() {
    let config: ParserConfig = serde_json::from_str(r#"{"report_summary": false}"#).unwrap();
    assert!(config.report_future_tweets);
    assert!(!config.report_summary);

    let json = serde_json::to_string(&ParserConfig::quiet()).unwrap();
    let back: ParserConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ParserConfig::quiet());
}
