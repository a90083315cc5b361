//! Popup configuration loaded from YAML.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{PopupError, PopupResult};
use crate::labels::PhraseBook;
use crate::schema::Schema;
use crate::services::StaticDataServices;
use crate::vocab::VocabIndex;

/// Address properties joined into the address block, in order.
pub const DEFAULT_ADDRESS_FIELDS: &[&str] = &["street", "locality", "region", "postcode", "countryId"];

const DEFAULT_LANGUAGE: &str = "EN";

/// Complete configuration for one deployment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PopupConfig {
    pub language: Option<String>,
    pub fields: Schema,
    pub labels: PhraseBook,
    pub vocabularies: VocabIndex,
    pub popup: PopupSettings,
}

/// Settings for the popup layout itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PopupSettings {
    pub address_fields: Vec<String>,
    pub report_link: Option<ReportLink>,
}

impl Default for PopupSettings {
    fn default() -> Self {
        PopupSettings {
            address_fields: DEFAULT_ADDRESS_FIELDS.iter().map(|s| s.to_string()).collect(),
            report_link: None,
        }
    }
}

/// Where the "report an error" link points.
///
/// The contact id is the last path segment of `property`'s value, appended to
/// `base_uri`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLink {
    pub base_uri: String,
    #[serde(default = "default_report_property")]
    pub property: String,
}

fn default_report_property() -> String {
    "uri".to_string()
}

impl PopupConfig {
    pub fn from_yaml_str(yaml: &str) -> PopupResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PopupResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PopupError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Split into the data-services façade and the layout settings.
    pub fn into_services(self) -> (StaticDataServices, PopupSettings) {
        let language = self.language().to_string();
        let services = StaticDataServices {
            language,
            labels: self.labels,
            schema: self.fields,
            vocabs: self.vocabularies,
        };
        (services, self.popup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::DataServices;

    #[test]
    fn test_empty_config_defaults() {
        let config = PopupConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.language(), "EN");
        assert!(config.fields.is_empty());
        assert_eq!(config.popup, PopupSettings::default());
        assert_eq!(config.popup.address_fields.len(), 5);
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
language: FR
fields:
  street: value
  industry: { type: vocab, uri: "ind:" }
labels:
  notAvailable: n/d
vocabularies:
  FR:
    "ind:": { title: Secteur, terms: { "ind:A": Agriculture } }
popup:
  addressFields: [street, postcode]
  reportLink:
    baseUri: "https://example.org/report?cid="
"#;
        let config = PopupConfig::from_yaml_str(yaml).unwrap();
        let (services, settings) = config.into_services();
        assert_eq!(services.language(), "FR");
        assert_eq!(services.functional_labels().not_available, "n/d");
        assert!(services.property_schema("industry").unwrap().is_vocab());
        assert_eq!(services.vocabs().term("ind:A", "FR", None), "Agriculture");
        assert_eq!(settings.address_fields, vec!["street", "postcode"]);
        assert_eq!(
            settings.report_link,
            Some(ReportLink {
                base_uri: "https://example.org/report?cid=".to_string(),
                property: "uri".to_string(),
            })
        );
    }

    #[test]
    fn test_bad_yaml() {
        assert!(matches!(
            PopupConfig::from_yaml_str("fields: [1, 2"),
            Err(PopupError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            PopupConfig::from_path("/nonexistent/popup.yaml"),
            Err(PopupError::Io { .. })
        ));
    }
}
