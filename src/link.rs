//! Links built from property values.
//!
//! A value either already carries a URI scheme (`https://...`) and is used
//! as-is, or it is expanded against a base: a plain string prefix, or a
//! dictionary of qname prefixes.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::qname::expand_qname;
use crate::record::Value;
use crate::template::{escape_html, Template};

pub const DEFAULT_LINK_TEMPLATE: &str = r#"<a href="%u" target="_blank" >%s</a>"#;

const MAIL_TEMPLATE: &str = r#"<a class="fa fa-at" href="%u" target="_blank" ></a>"#;
const PHONE_TEMPLATE: &str = r#"<a class="fa fa-phone" href="%u" target="_blank" ></a>"#;
const FACEBOOK_TEMPLATE: &str = r#"<a class="fab fa-facebook" href="%u" target="_blank" ></a>"#;
const TWITTER_TEMPLATE: &str = r#"<a class="fab fa-twitter" href="%u" target="_blank" ></a>"#;

const FACEBOOK_BASE: &str = "https://facebook.com";
const TWITTER_BASE: &str = "https://x.com";

/// Characters left alone by URI encoding: alphanumerics plus the URI reserved
/// and unreserved marks. Everything else, `%` and non-ASCII included, is
/// percent-encoded.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b',')
    .remove(b'#');

/// How to turn a scheme-less value into an absolute URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUri<'a> {
    /// Prepend this string
    Prefix(&'a str),
    /// Treat the value as a qname and expand its prefix
    QNames(&'a HashMap<String, String>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkOptions<'a> {
    /// Link text; defaults to the raw value
    pub text: Option<&'a str>,
    /// Defaults to [`DEFAULT_LINK_TEMPLATE`]
    pub template: Option<&'a str>,
    pub base_uri: Option<BaseUri<'a>>,
}

impl<'a> LinkOptions<'a> {
    pub fn template(template: &'a str) -> Self {
        LinkOptions {
            template: Some(template),
            ..Default::default()
        }
    }

    pub fn with_base(mut self, base: BaseUri<'a>) -> Self {
        self.base_uri = Some(base);
        self
    }

    pub fn with_text(mut self, text: &'a str) -> Self {
        self.text = Some(text);
        self
    }
}

/// True if `uri` starts with `scheme://`.
pub fn has_scheme(uri: &str) -> bool {
    static SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();
    SCHEME_REGEX
        .get_or_init(|| Regex::new(r"^\w+://").unwrap())
        .is_match(uri)
}

/// Join a base and a value with exactly one slash. A base that is a bare
/// scheme such as `mailto:`, `tel:` or `https://` is joined directly.
pub fn join_base(base: &str, value: &str) -> String {
    let value = value.trim_start_matches('/');
    if base.ends_with(':') || base.ends_with("://") {
        if value.starts_with(base) {
            return value.to_string();
        }
        return format!("{}{}", base, value);
    }
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return value.to_string();
    }
    format!("{}/{}", base, value)
}

/// Resolve `value` to an absolute URI. Values that already have a scheme, or
/// when there is no base, are returned unchanged.
pub fn expand_uri(value: &str, base: Option<&BaseUri<'_>>) -> String {
    match base {
        Some(_) if has_scheme(value) => value.to_string(),
        Some(BaseUri::Prefix(prefix)) => join_base(prefix, value),
        Some(BaseUri::QNames(dict)) => expand_qname(value, dict, None),
        None => value.to_string(),
    }
}

/// Percent-encode a URI for embedding in an attribute, leaving its structure
/// (`/`, `?`, `#`, `:` ...) intact.
pub fn encode_uri(uri: &str) -> String {
    utf8_percent_encode(uri, URI_ENCODE_SET).to_string()
}

/// Render a link from a property value.
///
/// Only non-empty text values produce a link; anything else renders as the
/// empty string. The URI goes into the template's `%u` slots, the escaped
/// text into its `%s` slots.
pub fn link(value: Option<&Value>, opts: &LinkOptions<'_>) -> String {
    let value = match value {
        Some(Value::Text(s)) if !s.is_empty() => s.as_str(),
        _ => return String::new(),
    };

    let text = escape_html(opts.text.unwrap_or(value));
    let template = opts.template.unwrap_or(DEFAULT_LINK_TEMPLATE);
    let uri = encode_uri(&expand_uri(value, opts.base_uri.as_ref()));

    Template::parse(template).render(Some(&text), Some(&uri))
}

pub fn mail_link(value: Option<&Value>) -> String {
    link(
        value,
        &LinkOptions::template(MAIL_TEMPLATE).with_base(BaseUri::Prefix("mailto:")),
    )
}

pub fn phone_link(value: Option<&Value>) -> String {
    link(
        value,
        &LinkOptions::template(PHONE_TEMPLATE).with_base(BaseUri::Prefix("tel:")),
    )
}

pub fn facebook_link(value: Option<&Value>) -> String {
    link(
        value,
        &LinkOptions::template(FACEBOOK_TEMPLATE).with_base(BaseUri::Prefix(FACEBOOK_BASE)),
    )
}

pub fn twitter_link(value: Option<&Value>) -> String {
    link(
        value,
        &LinkOptions::template(TWITTER_TEMPLATE).with_base(BaseUri::Prefix(TWITTER_BASE)),
    )
}
