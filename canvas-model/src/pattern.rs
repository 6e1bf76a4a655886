//! User-supplied validation patterns.
//!
//! Widgets accept a free-form regex string that is either slash-delimited
//! with flags (`/^foo$/i`) or a bare pattern (`^foo$`). Parsing never fails:
//! anything that does not compile is matched as literal text.

use regex_lite::Regex;
use tracing::debug;

/// Flags accepted after the closing slash of a delimited pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    pub global: bool,
    pub ignore_case: bool,
    pub multi_line: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub sticky: bool,
}

impl RegexFlags {
    /// Parses a flag suffix. Each of `gimsuy` may appear at most once;
    /// any other character rejects the whole suffix.
    pub fn parse(suffix: &str) -> Option<Self> {
        let mut flags = Self::default();
        for c in suffix.chars() {
            let slot = match c {
                'g' => &mut flags.global,
                'i' => &mut flags.ignore_case,
                'm' => &mut flags.multi_line,
                's' => &mut flags.dot_all,
                'u' => &mut flags.unicode,
                'y' => &mut flags.sticky,
                _ => return None,
            };
            if *slot {
                return None;
            }
            *slot = true;
        }
        Some(flags)
    }

    fn inline_prefix(&self) -> String {
        let mut inline = String::new();
        if self.ignore_case {
            inline.push('i');
        }
        if self.multi_line {
            inline.push('m');
        }
        if self.dot_all {
            inline.push('s');
        }
        if inline.is_empty() {
            inline
        } else {
            format!("(?{inline})")
        }
    }
}

/// A compiled validation pattern.
#[derive(Debug, Clone)]
pub struct TextPattern {
    source: String,
    matcher: Matcher,
    sticky: bool,
}

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    /// The source did not compile and is matched as plain text.
    Literal,
}

impl TextPattern {
    /// Parses a regex string. Returns `None` for an empty string, meaning
    /// "no pattern constraint".
    ///
    /// 1. `/pattern/flags` with a valid flag suffix compiles `pattern` with
    ///    those flags.
    /// 2. Anything else (including an unterminated `/abc` or an invalid
    ///    suffix such as `/abc/xyz`) compiles the full string.
    /// 3. A pattern that fails to compile (bad syntax, lookaround, or over
    ///    the compiled size limit) is matched as literal text.
    pub fn parse(source: &str) -> Option<Self> {
        if source.is_empty() {
            return None;
        }

        let (body, flags) = split_delimited(source).unwrap_or((source, RegexFlags::default()));
        let compiled = format!("{}{}", flags.inline_prefix(), body);

        let matcher = match Regex::new(&compiled) {
            Ok(regex) => Matcher::Regex(regex),
            Err(e) => {
                debug!(
                    "pattern of {} bytes does not compile ({}), matching literally",
                    source.len(),
                    e
                );
                Matcher::Literal
            }
        };

        Some(Self {
            source: source.to_string(),
            matcher,
            sticky: flags.sticky,
        })
    }

    /// Tests the pattern against `text` (unanchored unless the sticky flag was given).
    pub fn is_match(&self, text: &str) -> bool {
        match (&self.matcher, self.sticky) {
            (Matcher::Regex(regex), false) => regex.is_match(text),
            (Matcher::Regex(regex), true) => regex.find(text).is_some_and(|m| m.start() == 0),
            (Matcher::Literal, false) => text.contains(self.source.as_str()),
            (Matcher::Literal, true) => text.starts_with(self.source.as_str()),
        }
    }

    /// The string the pattern was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled expression, or the source for a literal fallback.
    pub fn as_str(&self) -> &str {
        match &self.matcher {
            Matcher::Regex(regex) => regex.as_str(),
            Matcher::Literal => &self.source,
        }
    }

    /// Whether compilation failed and the source is matched as literal text.
    pub fn is_literal_fallback(&self) -> bool {
        matches!(self.matcher, Matcher::Literal)
    }
}

fn split_delimited(source: &str) -> Option<(&str, RegexFlags)> {
    let rest = source.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, suffix) = (&rest[..close], &rest[close + 1..]);
    if body.is_empty() {
        return None;
    }
    RegexFlags::parse(suffix).map(|flags| (body, flags))
}
