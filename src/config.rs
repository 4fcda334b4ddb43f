//! Parser configuration

/// Controls which optional diagnostics the parser emits
///
/// Parsing results never depend on these settings: future-dated tweets are
/// always kept and broken lines are always dropped. Only the reporting changes.
///
/// # Example
///
/// ```
/// use twtxt::ParserConfig;
///
/// let config = ParserConfig::default();
/// assert!(config.report_future_tweets);
/// assert!(config.report_summary);
///
/// // Per-line errors only
/// let config = ParserConfig {
///     report_summary: false,
///     ..ParserConfig::default()
/// };
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserConfig {
    /// Warn when a tweet is dated after the reference time
    ///
    /// Default: `true`
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub report_future_tweets: bool,

    /// Emit a per-feed tally when at least one line failed
    ///
    /// Default: `true`
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub report_summary: bool,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl ParserConfig {
    /// Create the default configuration (all reports enabled)
    pub fn new() -> Self {
        Self {
            report_future_tweets: true,
            report_summary: true,
        }
    }

    /// Configuration that only reports per-line errors
    pub fn quiet() -> Self {
        Self {
            report_future_tweets: false,
            report_summary: false,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}
