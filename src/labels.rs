use serde::Deserialize;
use std::collections::HashMap;

/// Localized functional labels for the active language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhraseBook {
    pub not_available: String,
    pub no_location: String,
    pub report_an_error: String,
    /// Any other labels, looked up by key
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

impl Default for PhraseBook {
    fn default() -> Self {
        PhraseBook {
            not_available: "N/A".to_string(),
            no_location: "No location available".to_string(),
            report_an_error: "Report an error".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl PhraseBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.extra.insert(key.into(), label.into());
        self
    }

    /// Look up a label by its key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "notAvailable" => Some(&self.not_available),
            "noLocation" => Some(&self.no_location),
            "reportAnError" => Some(&self.report_an_error),
            other => self.extra.get(other).map(String::as_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let labels = PhraseBook::new();
        assert_eq!(labels.get("notAvailable"), Some("N/A"));
        assert_eq!(labels.get("address"), None);
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = "notAvailable: n/d\naddress: Adresse\ncontact: Contact\n";
        let labels: PhraseBook = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(labels.not_available, "n/d");
        assert_eq!(labels.no_location, "No location available");
        assert_eq!(labels.get("address"), Some("Adresse"));
        assert_eq!(labels.get("contact"), Some("Contact"));
    }
}
