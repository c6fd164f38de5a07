//! The line translator: unescape, skip placeholders and numerics, look the
//! text up by content hash, and report unknown lines when allowed. Every
//! path returns *some* string; failures degrade to the original text.

use std::borrow::Cow;

use crate::metrics::counter_names;

use super::dictionary::Lookup;
use super::Translator;

impl Translator {
    /// Translate one line against a loaded dictionary. Callers are expected
    /// to have settled readiness already; this never blocks.
    pub(crate) fn translate_line(&self, raw: &str, endpoint: &str, key: &str) -> String {
        let line = unescape(raw);

        // Placeholders are never translated or reported.
        if line.is_empty() || line.as_ref() == "-" {
            self.metrics().incr(counter_names::LINES_PASSED);
            return raw.to_string();
        }

        // Numeric fields are never translatable text.
        if is_numeric_literal(&line) {
            self.metrics().incr(counter_names::LINES_PASSED);
            return raw.to_string();
        }

        // Known non-translatable fields skip the lookup and the report alike.
        if self.blacklist.is_listed(endpoint, key) {
            self.metrics().incr(counter_names::LINES_PASSED);
            return raw.to_string();
        }

        let hash = crc32fast::hash(line.as_bytes());
        match self.dictionary.read().lookup(hash) {
            Lookup::Translated(text) => {
                self.metrics().incr(counter_names::LINES_TRANSLATED);
                text
            }
            Lookup::KnownGap => {
                self.metrics().incr(counter_names::DICT_KNOWN_GAPS);
                raw.to_string()
            }
            Lookup::Miss => {
                self.metrics().incr(counter_names::DICT_MISSES);
                if self.config.report_untranslated
                    && !endpoint.is_empty()
                    && self.blacklist.is_loaded()
                {
                    self.try_report(endpoint, &line);
                }
                raw.to_string()
            }
        }
    }
}

/// Decode backslash escapes (`\n`, `\t`, `\uXXXX`, surrogate pairs) that
/// arrive literally inside API strings. Escape-free input is borrowed
/// unchanged; malformed escapes are left as written.
pub(crate) fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => push_unicode_escape(&mut chars, &mut out),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

fn push_unicode_escape(chars: &mut std::str::Chars<'_>, out: &mut String) {
    let mut digits = String::new();
    for _ in 0..4 {
        match chars.next() {
            Some(d) => digits.push(d),
            None => {
                out.push_str("\\u");
                out.push_str(&digits);
                return;
            }
        }
    }
    let Ok(mut code) = u32::from_str_radix(&digits, 16) else {
        out.push_str("\\u");
        out.push_str(&digits);
        return;
    };

    // High surrogate: try to pair it with a following \uXXXX low surrogate.
    if (0xD800..0xDC00).contains(&code) {
        let mut rest = chars.clone();
        if rest.next() == Some('\\') && rest.next() == Some('u') {
            let mut low_digits = String::new();
            for _ in 0..4 {
                if let Some(d) = rest.next() {
                    low_digits.push(d);
                }
            }
            if low_digits.len() == 4 {
                if let Ok(low) = u32::from_str_radix(&low_digits, 16) {
                    if (0xDC00..0xE000).contains(&low) {
                        code = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                        *chars = rest;
                    }
                }
            }
        }
    }

    match char::from_u32(code) {
        Some(c) => out.push(c),
        None => {
            out.push_str("\\u");
            out.push_str(&digits);
        }
    }
}

/// Whether the whole line parses as a numeric literal.
pub(crate) fn is_numeric_literal(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok()
}
