//! Removal of terminal styling from tweet text
//!
//! Feeds occasionally contain raw ANSI escape sequences (colors, cursor
//! movement). They are stripped before the text reaches a [`Tweet`](crate::Tweet)
//! so a hostile feed cannot repaint the reader's terminal.

use regex::Regex;
use std::sync::LazyLock;

/// CSI sequences: `ESC [` parameters, final letter
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[;?0-9]*[a-zA-Z]").expect("ANSI escape pattern is a valid regex")
});

/// Strips ANSI escape sequences from `text`
///
/// Non-markup characters are left untouched. Stripping is repeated until the
/// text is stable, so sequences spliced together from fragments are removed
/// too and `strip_markup(strip_markup(s)) == strip_markup(s)`.
///
/// # Examples
///
/// ```
/// use twtxt::unstyle::strip_markup;
///
/// assert_eq!(strip_markup("\x1b[1mbold\x1b[0m text"), "bold text");
/// assert_eq!(strip_markup("plain"), "plain");
/// ```
pub fn strip_markup(text: &str) -> String {
    let mut current = ANSI_ESCAPE.replace_all(text, "").into_owned();
    while ANSI_ESCAPE.is_match(&current) {
        current = ANSI_ESCAPE.replace_all(&current, "").into_owned();
    }
    current
}
