//! Feed identity and parsed tweet types
//!
//! A [`Source`] names the feed a line came from. Every [`Tweet`] parsed from
//! that feed holds an [`Arc`] to the same `Source`, so a timeline merged from
//! many feeds can still tell who wrote what.

use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Identity of a twtxt feed
///
/// # Example
///
/// ```
/// use twtxt::Source;
///
/// let source = Source::new("alice", "https://example.com/twtxt.txt");
/// assert_eq!(source.to_string(), "alice@https://example.com/twtxt.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Source {
    /// Display nickname of the feed owner
    pub nick: String,
    /// Location the feed was fetched from
    pub url: String,
}

impl Source {
    /// Create a new feed identity
    pub fn new(nick: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.nick, self.url)
    }
}

/// A single parsed twtxt status
///
/// `text` has already had display markup stripped and surrounding whitespace
/// trimmed. `created_at` always carries an explicit offset.
///
/// Tweets sort by `created_at`, then by `text`, then by source. Use
/// `sort_by(|a, b| b.cmp(a))` for a newest-first timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    /// Message body
    pub text: String,
    /// When the status was posted
    pub created_at: DateTime<FixedOffset>,
    /// Feed the status came from
    pub source: Arc<Source>,
}

impl Tweet {
    /// Create a tweet from already-normalized parts
    pub fn new(
        text: impl Into<String>,
        created_at: DateTime<FixedOffset>,
        source: Arc<Source>,
    ) -> Self {
        Self {
            text: text.into(),
            created_at,
            source,
        }
    }
}

impl Ord for Tweet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.text.cmp(&other.text))
            .then_with(|| self.source.cmp(&other.source))
    }
}

impl PartialOrd for Tweet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Renders the tweet as a twtxt line: `<rfc3339>\t<text>`
impl fmt::Display for Tweet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.created_at.to_rfc3339(), self.text)
    }
}
