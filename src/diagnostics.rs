//! Parser diagnostics
//!
//! The parser never fails a whole feed because of one bad line. Instead it
//! reports what it skipped through a [`DiagnosticSink`]. The default
//! [`TracingSink`] forwards everything to `tracing`; [`MemorySink`] keeps the
//! diagnostics around so callers (and tests) can inspect them.

use crate::TwtxtError;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::{Level, error, warn};

/// Something worth telling the user about a feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A tweet is dated after the reference time. The tweet is still kept.
    FutureTweet {
        /// Feed owner's nickname
        nick: String,
        /// Feed URL
        url: String,
        /// Timestamp exactly as written in the feed
        raw_timestamp: String,
        /// How far ahead, e.g. `"3 days from now"`
        from_now: String,
    },

    /// A line could not be parsed and was dropped
    LineError {
        /// Feed URL
        url: String,
        /// Why the line was rejected
        error: TwtxtError,
    },

    /// End-of-feed tally, only emitted when at least one line failed
    Summary {
        /// Feed URL
        url: String,
        /// Tweets successfully parsed
        tweets: usize,
        /// Lines that failed
        errors: usize,
    },
}

impl Diagnostic {
    /// Severity the diagnostic should be logged at
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::FutureTweet { .. } => Level::WARN,
            Diagnostic::LineError { .. } | Diagnostic::Summary { .. } => Level::ERROR,
        }
    }

    /// URL of the feed the diagnostic is about
    pub fn url(&self) -> &str {
        match self {
            Diagnostic::FutureTweet { url, .. }
            | Diagnostic::LineError { url, .. }
            | Diagnostic::Summary { url, .. } => url,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FutureTweet {
                nick,
                url,
                raw_timestamp,
                from_now,
            } => write!(
                f,
                "Tweet by {}@{} is from the future: {:?} {}",
                nick, url, raw_timestamp, from_now
            ),
            Diagnostic::LineError { url, error } => write!(f, "{} - {}", url, error),
            Diagnostic::Summary {
                url,
                tweets,
                errors,
            } => write!(f, "{} - {} tweets, {} errors", url, tweets, errors),
        }
    }
}

/// Receiver for parser diagnostics
///
/// Implementations must be cheap to call and must not panic; the parser calls
/// [`emit`](DiagnosticSink::emit) inline while walking a feed.
pub trait DiagnosticSink: Send + Sync {
    /// Record one diagnostic
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to `tracing` at their [`level`](Diagnostic::level)
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        let url = diagnostic.url();
        if diagnostic.level() == Level::WARN {
            warn!(url = %url, "{}", diagnostic);
        } else {
            error!(url = %url, "{}", diagnostic);
        }
    }
}

/// Collects diagnostics in memory
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use twtxt::{MemorySink, Source, TweetParser};
///
/// let sink = Arc::new(MemorySink::new());
/// let parser = TweetParser::new().with_sink(sink.clone());
/// let source = Arc::new(Source::new("alice", "https://example.com/twtxt.txt"));
///
/// let tweets = parser.parse_tweets(["no tab here"], &source);
/// assert!(tweets.is_empty());
/// assert_eq!(sink.len(), 2); // the line error plus the summary
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in order
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of diagnostics emitted so far
    pub fn len(&self) -> usize {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been emitted
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return everything emitted so far
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(
            &mut *self
                .diagnostics
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic.clone());
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<S> {
    fn emit(&self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic)
    }
}
