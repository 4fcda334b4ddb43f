//! twtxt line and feed parsing
//!
//! A twtxt feed is a plain-text file with one status per line:
//!
//! ```text
//! # nick = alice
//! 2016-12-25T12:00:00+00:00	Merry Christmas!
//! 2016-12-26T08:30:00+00:00	Back to work.
//! ```
//!
//! Each line is a timestamp, a tab, and the message. Blank lines and lines
//! starting with `#` are ignored. A line that cannot be parsed is dropped and
//! reported through the parser's [`DiagnosticSink`]; it never stops the rest of
//! the feed from being parsed.

use crate::clock::{Clock, SystemClock};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::humanize::natural_delta;
use crate::timestamp::parse_iso8601;
use crate::unstyle::strip_markup;
use crate::{ParserConfig, Result, Source, Tweet, TwtxtError};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Result of parsing a whole feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    /// Parsed tweets, in feed order
    pub tweets: Vec<Tweet>,
    /// Lines dropped because they failed to parse
    pub errors: usize,
    /// Blank and comment lines
    pub skipped: usize,
}

/// Configurable twtxt parser
///
/// Bundles the [`ParserConfig`], the [`DiagnosticSink`] that receives reports
/// about skipped lines, and the [`Clock`] used to detect future-dated tweets.
/// The defaults log through `tracing` and use the system clock.
///
/// A parser holds no per-feed state, so one instance can parse many feeds,
/// including from several threads at once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::{TimeZone, Utc};
/// use twtxt::{FixedClock, Source, TweetParser};
///
/// let now = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
/// let parser = TweetParser::new().with_clock(FixedClock(now));
/// let source = Arc::new(Source::new("alice", "https://example.com/twtxt.txt"));
///
/// let tweets = parser.parse_tweets(
///     ["# a comment", "", "2016-12-25T12:00:00+00:00\tHello world"],
///     &source,
/// );
/// assert_eq!(tweets.len(), 1);
/// assert_eq!(tweets[0].text, "Hello world");
/// ```
#[derive(Clone)]
pub struct TweetParser {
    config: ParserConfig,
    sink: Arc<dyn DiagnosticSink>,
    clock: Arc<dyn Clock>,
}

impl TweetParser {
    /// Create a parser with the default configuration, `tracing` diagnostics
    /// and the system clock
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            sink: Arc::new(TracingSink),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Send diagnostics to `sink` instead of `tracing`
    #[must_use]
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Take the reference time from `clock` instead of the system clock
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Current configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one raw line, using the parser's clock as the reference time
    ///
    /// See [`parse_tweet_at`](Self::parse_tweet_at).
    pub fn parse_tweet(&self, raw_tweet: &str, source: &Arc<Source>) -> Result<Option<Tweet>> {
        self.parse_tweet_at(raw_tweet, source, self.clock.now())
    }

    /// Parse one raw line against the reference time `now`
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments. A tweet dated after
    /// `now` is still returned; the parser only emits a
    /// [`Diagnostic::FutureTweet`] warning for it.
    ///
    /// # Errors
    ///
    /// - [`TwtxtError::MalformedLine`] - no tab between timestamp and text
    /// - [`TwtxtError::MalformedTimestamp`] - timestamp not recognizable
    /// - [`TwtxtError::TimestampOutOfRange`] - year outside `1..=9999`
    pub fn parse_tweet_at(
        &self,
        raw_tweet: &str,
        source: &Arc<Source>,
        now: DateTime<Utc>,
    ) -> Result<Option<Tweet>> {
        // Tolerate lines handed over with their terminator still attached
        let line = raw_tweet.trim_end_matches(['\r', '\n']);
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (raw_created_at, text) = line.split_once('\t').ok_or_else(|| {
            TwtxtError::MalformedLine(format!("missing tab separator in {:?}", line))
        })?;

        let created_at = parse_iso8601(raw_created_at)?;

        let created_utc = created_at.with_timezone(&Utc);
        if created_utc > now && self.config.report_future_tweets {
            self.sink.emit(&Diagnostic::FutureTweet {
                nick: source.nick.clone(),
                url: source.url.clone(),
                raw_timestamp: raw_created_at.to_string(),
                from_now: format!("{} from now", natural_delta(now - created_utc)),
            });
        }

        Ok(Some(Tweet::new(
            strip_markup(text).trim(),
            created_at,
            Arc::clone(source),
        )))
    }

    /// Parse a sequence of raw lines, using the parser's clock as the reference time
    ///
    /// The clock is read once, so all lines are judged against the same instant.
    pub fn parse_tweets<I, S>(&self, raw_tweets: I, source: &Arc<Source>) -> Vec<Tweet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse_feed_at(raw_tweets, source, self.clock.now()).tweets
    }

    /// Parse a sequence of raw lines against the reference time `now`
    pub fn parse_tweets_at<I, S>(
        &self,
        raw_tweets: I,
        source: &Arc<Source>,
        now: DateTime<Utc>,
    ) -> Vec<Tweet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse_feed_at(raw_tweets, source, now).tweets
    }

    /// Split whole feed content into lines and parse them
    ///
    /// Both `\n` and `\r\n` line endings are accepted.
    pub fn parse_text(&self, content: &str, source: &Arc<Source>) -> Vec<Tweet> {
        self.parse_tweets(content.lines(), source)
    }

    /// Parse a sequence of raw lines and report the tallies alongside the tweets
    pub fn parse_feed<I, S>(&self, raw_tweets: I, source: &Arc<Source>) -> ParsedFeed
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse_feed_at(raw_tweets, source, self.clock.now())
    }

    /// Parse a sequence of raw lines against `now` and report the tallies
    ///
    /// Lines are parsed independently and tweets keep their input order. Every
    /// failing line is reported as a [`Diagnostic::LineError`] and counted; if
    /// any failed, a [`Diagnostic::Summary`] follows at the end. This method
    /// itself never fails.
    pub fn parse_feed_at<I, S>(
        &self,
        raw_tweets: I,
        source: &Arc<Source>,
        now: DateTime<Utc>,
    ) -> ParsedFeed
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut feed = ParsedFeed::default();

        for line in raw_tweets {
            match self.parse_tweet_at(line.as_ref(), source, now) {
                Ok(Some(tweet)) => feed.tweets.push(tweet),
                Ok(None) => feed.skipped += 1,
                Err(error) => {
                    self.sink.emit(&Diagnostic::LineError {
                        url: source.url.clone(),
                        error,
                    });
                    feed.errors += 1;
                }
            }
        }

        if feed.errors > 0 && self.config.report_summary {
            self.sink.emit(&Diagnostic::Summary {
                url: source.url.clone(),
                tweets: feed.tweets.len(),
                errors: feed.errors,
            });
        }

        trace!(
            "Parsed {}: {} tweets, {} errors, {} skipped",
            source.url,
            feed.tweets.len(),
            feed.errors,
            feed.skipped
        );

        feed
    }
}

impl Default for TweetParser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TweetParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweetParser")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Parse a single raw twtxt line
///
/// `now` defaults to the current UTC time. Diagnostics go to `tracing`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use twtxt::{parse_tweet, Source, TwtxtError};
///
/// let source = Arc::new(Source::new("alice", "https://example.com/twtxt.txt"));
///
/// let tweet = parse_tweet("2016-12-25T12:00:00Z\t  Hello  ", &source, None)
///     .unwrap()
///     .unwrap();
/// assert_eq!(tweet.text, "Hello");
///
/// assert_eq!(parse_tweet("# comment", &source, None).unwrap(), None);
/// assert!(matches!(
///     parse_tweet("no tab", &source, None),
///     Err(TwtxtError::MalformedLine(_))
/// ));
/// ```
pub fn parse_tweet(
    raw_tweet: &str,
    source: &Arc<Source>,
    now: Option<DateTime<Utc>>,
) -> Result<Option<Tweet>> {
    let parser = TweetParser::new();
    match now {
        Some(now) => parser.parse_tweet_at(raw_tweet, source, now),
        None => parser.parse_tweet(raw_tweet, source),
    }
}

/// Parse a list of raw twtxt lines, dropping (and logging) the ones that fail
///
/// `now` defaults to the current UTC time, read once for the whole batch.
/// Diagnostics go to `tracing`.
pub fn parse_tweets<I, S>(
    raw_tweets: I,
    source: &Arc<Source>,
    now: Option<DateTime<Utc>>,
) -> Vec<Tweet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parser = TweetParser::new();
    match now {
        Some(now) => parser.parse_tweets_at(raw_tweets, source, now),
        None => parser.parse_tweets(raw_tweets, source),
    }
}

/// Parse whole feed content, as fetched
///
/// Equivalent to [`parse_tweets`] over `content.lines()`.
pub fn parse_text(
    content: &str,
    source: &Arc<Source>,
    now: Option<DateTime<Utc>>,
) -> Vec<Tweet> {
    parse_tweets(content.lines(), source, now)
}
