//! Vocabularies: namespaced, localized code lists.

use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::fallback::FallbackChain;
use crate::qname::parse_qname;

/// One vocabulary in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Vocab {
    #[serde(default)]
    pub title: String,
    /// Term labels keyed by the full code, e.g. `ind:A`
    #[serde(default)]
    pub terms: HashMap<String, String>,
}

/// Vocabulary lookups, as provided by the hosting map application.
pub trait VocabServices {
    /// The vocabulary with namespace `uri` (e.g. `ind:`) in language `lang`.
    fn vocab(&self, uri: &str, lang: &str) -> Option<&Vocab>;

    /// The label of `code` in language `lang`. Never empty: unknown codes
    /// fall back to `default`, then to the code itself.
    fn term(&self, code: &str, lang: &str, default: Option<&str>) -> String;
}

/// In-memory vocabularies keyed by language, then namespace.
///
/// ```yaml
/// EN:
///   "ind:":
///     title: Industry
///     terms: { "ind:A": Agriculture }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct VocabIndex {
    langs: HashMap<String, HashMap<String, Vocab>>,
}

impl VocabIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lang: &str, uri: &str, vocab: Vocab) {
        self.langs
            .entry(lang.to_string())
            .or_default()
            .insert(uri.to_string(), vocab);
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.langs.keys().map(String::as_str)
    }

    fn lookup(&self, code: &str, lang: &str) -> Option<&str> {
        let qname = parse_qname(code)?;
        let uri = format!("{}:", qname.prefix);
        self.vocab(&uri, lang)?.terms.get(code).map(String::as_str)
    }
}

impl VocabServices for VocabIndex {
    fn vocab(&self, uri: &str, lang: &str) -> Option<&Vocab> {
        self.langs.get(lang)?.get(uri)
    }

    fn term(&self, code: &str, lang: &str, default: Option<&str>) -> String {
        let code = code.trim();
        let chain = FallbackChain::new().then(self.lookup(code, lang));
        if !chain.is_resolved() {
            debug!(code, lang, "vocabulary term not found");
        }
        chain.then(default).or(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> VocabIndex {
        let yaml = r#"
EN:
  "ind:":
    title: Industry
    terms:
      "ind:A": Agriculture
      "ind:B": Construction
FR:
  "ind:":
    title: Secteur
    terms:
      "ind:A": Agriculture (FR)
"#;
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_vocab_by_language() {
        let idx = index();
        assert_eq!(idx.vocab("ind:", "EN").unwrap().title, "Industry");
        assert_eq!(idx.vocab("ind:", "FR").unwrap().title, "Secteur");
        assert!(idx.vocab("ind:", "DE").is_none());
        assert!(idx.vocab("xx:", "EN").is_none());
    }

    #[test]
    fn test_term_lookup() {
        let idx = index();
        assert_eq!(idx.term("ind:B", "EN", None), "Construction");
        assert_eq!(idx.term(" ind:A ", "FR", None), "Agriculture (FR)");
    }

    #[test]
    fn test_term_fallbacks() {
        let idx = index();
        assert_eq!(idx.term("ind:Z", "EN", Some("Other")), "Other");
        assert_eq!(idx.term("ind:Z", "EN", None), "ind:Z");
        assert_eq!(idx.term("nocolon", "EN", None), "nocolon");
    }

    #[test]
    fn test_insert() {
        let mut idx = VocabIndex::new();
        idx.insert("EN", "ui:", Vocab {
            title: "UI".to_string(),
            terms: HashMap::from([("ui:address".to_string(), "Address".to_string())]),
        });
        assert_eq!(idx.term("ui:address", "EN", None), "Address");
        assert_eq!(idx.languages().collect::<Vec<_>>(), vec!["EN"]);
    }
}
