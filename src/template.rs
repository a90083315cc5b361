//! Micro-templates with `%s`, `%u` and `%%` tokens.
//!
//! - `%s` is the text slot. Values placed here are HTML-escaped unless the
//!   caller opts out.
//! - `%u` is the URI slot. Values are expected to be percent-encoded already
//!   and are inserted verbatim.
//! - `%%` is a literal `%`, so a literal `%s` is written `%%s`.
//!
//! A `%s` or `%u` directly after a `%%` stays literal, so `100%%%s` renders
//! as `100%%s`. A slot without a value renders as its own source text.

use std::fmt::Display;

use crate::fallback::FallbackChain;

/// Escape the five HTML-significant characters. `&` goes first so the entities
/// produced by later replacements are not re-escaped.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Text,
    Uri,
    Percent,
}

/// A tokenized template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> Template<'a> {
    pub fn parse(source: &'a str) -> Self {
        let mut tokens = Vec::new();
        let mut rest = source;

        while let Some(pos) = rest.find('%') {
            if pos > 0 {
                tokens.push(Token::Literal(&rest[..pos]));
            }
            let after_percent = pos == 0 && tokens.last() == Some(&Token::Percent);
            let after = &rest[pos + 1..];
            let (token, consumed) = match after.as_bytes().first().copied() {
                Some(b's' | b'u') if after_percent => (Token::Literal(&rest[pos..pos + 2]), 2),
                Some(b's') => (Token::Text, 2),
                Some(b'u') => (Token::Uri, 2),
                Some(b'%') => (Token::Percent, 2),
                // A lone percent is kept as-is.
                _ => (Token::Literal(&rest[pos..pos + 1]), 1),
            };
            tokens.push(token);
            rest = &rest[pos + consumed..];
        }
        if !rest.is_empty() {
            tokens.push(Token::Literal(rest));
        }

        Template { tokens }
    }

    /// Render with the given slot values. Values are inserted as given; escaping
    /// is the caller's responsibility.
    pub fn render(&self, text: Option<&str>, uri: Option<&str>) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(s) => out.push_str(s),
                Token::Text => out.push_str(text.unwrap_or("%s")),
                Token::Uri => out.push_str(uri.unwrap_or("%u")),
                Token::Percent => out.push('%'),
            }
        }
        out
    }
}

/// Options for [`insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOptions<'a> {
    /// Returned instead of the expanded template when the value is absent or empty.
    pub default: Option<&'a str>,
    /// HTML-escape the value (the template and default are never escaped).
    pub escape: bool,
}

impl Default for InsertOptions<'_> {
    fn default() -> Self {
        InsertOptions {
            default: None,
            escape: true,
        }
    }
}

impl<'a> InsertOptions<'a> {
    pub fn with_default(default: &'a str) -> Self {
        InsertOptions {
            default: Some(default),
            ..Default::default()
        }
    }

    /// Opt out of escaping, for trusted values.
    pub fn unescaped(mut self) -> Self {
        self.escape = false;
        self
    }
}

/// Expand `template` with `value` in its `%s` slots, but only if the value is
/// present and stringifies to something non-empty. Otherwise the default (or
/// the empty string) is returned.
pub fn insert<V: Display>(value: Option<V>, template: &str, opts: &InsertOptions<'_>) -> String {
    let value = value.map(|v| v.to_string()).filter(|s| !s.is_empty());
    let Some(value) = value else {
        return FallbackChain::new().then(opts.default).or("");
    };

    let value = if opts.escape { escape_html(&value) } else { value };
    Template::parse(template).render(Some(&value), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_does_not_double_escape() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_tokenize() {
        let t = Template::parse("a%sb%uc%%d%");
        assert_eq!(
            t.tokens,
            vec![
                Token::Literal("a"),
                Token::Text,
                Token::Literal("b"),
                Token::Uri,
                Token::Literal("c"),
                Token::Percent,
                Token::Literal("d"),
                Token::Literal("%"),
            ]
        );
    }

    #[test]
    fn test_literal_percent_s() {
        assert_eq!(
            insert(Some("x"), "literal %%s", &InsertOptions::default()),
            "literal %s"
        );
    }

    #[test]
    fn test_placeholder_after_escaped_percent_stays_literal() {
        assert_eq!(insert(Some("x"), "100%%%s", &InsertOptions::default()), "100%%s");
        assert_eq!(
            Template::parse("%%%u %s").render(Some("t"), Some("u")),
            "%%u t"
        );
        // Separated by a literal, the placeholder is live again
        assert_eq!(insert(Some("x"), "%% %s", &InsertOptions::default()), "% x");
    }

    #[test]
    fn test_every_placeholder_replaced() {
        assert_eq!(
            insert(Some("v"), "<b>%s</b>/%s", &InsertOptions::default()),
            "<b>v</b>/v"
        );
    }

    #[test]
    fn test_uri_slot_left_alone_by_insert() {
        assert_eq!(insert(Some("v"), "%u:%s", &InsertOptions::default()), "%u:v");
    }

    #[test]
    fn test_value_is_escaped() {
        let out = insert(Some("<i>&"), "<p>%s</p>", &InsertOptions::default());
        assert_eq!(out, "<p>&lt;i&gt;&amp;</p>");
        assert!(!out.contains("%s"));
    }

    #[test]
    fn test_escape_opt_out() {
        let out = insert(Some("<i>x</i>"), "<p>%s</p>", &InsertOptions::default().unescaped());
        assert_eq!(out, "<p><i>x</i></p>");
    }

    #[test]
    fn test_absent_uses_default() {
        assert_eq!(insert(None::<&str>, "<p>%s</p>", &InsertOptions::with_default("D")), "D");
        assert_eq!(insert(None::<&str>, "<p>%s</p>", &InsertOptions::default()), "");
    }

    #[test]
    fn test_empty_uses_default() {
        assert_eq!(insert(Some(""), "<p>%s</p>", &InsertOptions::default()), "");
        assert_eq!(insert(Some(""), "<p>%s</p>", &InsertOptions::with_default("D")), "D");
    }

    #[test]
    fn test_non_string_values_are_stringified() {
        assert_eq!(insert(Some(42), "n=%s", &InsertOptions::default()), "n=42");
        assert_eq!(insert(Some(true), "%s", &InsertOptions::default()), "true");
    }
}
