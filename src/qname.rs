//! Qualified names (`prefix:local`) as used for vocabulary codes and URI
//! abbreviations.
//!
//! The prefix follows the XML `NCName` grammar
//! (<https://www.w3.org/TR/REC-xml-names/#NT-QName>): a name-start character
//! (letter or underscore) followed by name characters (which additionally allow
//! digits, `.`, middle dot, combining marks, the undertie/character-tie pair and
//! `-`). Only the first colon separates prefix from local part; the local part
//! is unconstrained and may itself contain colons.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

const NAME_START: &str = r"\p{L}\p{Nl}_";
const NAME_CHAR: &str = r"\p{L}\p{Nl}_\p{Nd}\p{Mn}\p{Mc}.\x{B7}\x{203F}\x{2040}\-";

/// A parsed `prefix:local` token, borrowing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QName<'a> {
    pub prefix: &'a str,
    pub local: &'a str,
}

fn prefix_regex() -> &'static Regex {
    static QNAME_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
    QNAME_PREFIX_REGEX.get_or_init(|| {
        Regex::new(&format!("^[{NAME_START}][{NAME_CHAR}]*:")).unwrap()
    })
}

/// Parse `input` as a qualified name.
///
/// Matching is anchored at the start of the string and nothing is trimmed;
/// callers that accept user data should trim first.
pub fn parse_qname(input: &str) -> Option<QName<'_>> {
    let m = prefix_regex().find(input)?;
    // The match always ends with the separating colon.
    let prefix = &input[..m.end() - 1];
    let local = &input[m.end()..];
    Some(QName { prefix, local })
}

/// Expand a qualified name using a prefix → base URI dictionary.
///
/// The input is trimmed first. When it does not parse, or its prefix is not in
/// the dictionary, `default` is returned if given, otherwise the trimmed input.
pub fn expand_qname(qname: &str, dict: &HashMap<String, String>, default: Option<&str>) -> String {
    let qname = qname.trim();
    if let Some(parsed) = parse_qname(qname) {
        if let Some(base) = dict.get(parsed.prefix) {
            return format!("{}{}", base, parsed.local);
        }
        debug!(prefix = parsed.prefix, "qname prefix not in dictionary");
    }
    default.unwrap_or(qname).to_string()
}
