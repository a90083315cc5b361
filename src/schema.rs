use serde::Deserialize;
use std::collections::HashMap;

/// The four kinds of property a record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    PlainValue,
    SingleVocab,
    MultiVocab,
    Custom,
}

/// Schema definition of one property.
///
/// In YAML a plain or custom property is written as a bare kind (`value`,
/// `custom`); vocabulary properties are mappings:
/// ```yaml
/// industry: { type: vocab, uri: "ind:" }
/// activities: { type: multi, uri: "aci:" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPropDef")]
pub enum PropDef {
    Value,
    Custom,
    Vocab {
        /// Vocabulary namespace, e.g. `ind:`
        uri: String,
        multi: bool,
        /// Default filter code offered by the map's search UI
        filter: Option<String>,
    },
}

impl PropDef {
    pub fn vocab(uri: &str) -> Self {
        PropDef::Vocab {
            uri: uri.to_string(),
            multi: false,
            filter: None,
        }
    }

    pub fn multi(uri: &str) -> Self {
        PropDef::Vocab {
            uri: uri.to_string(),
            multi: true,
            filter: None,
        }
    }

    pub fn kind(&self) -> PropKind {
        match self {
            PropDef::Value => PropKind::PlainValue,
            PropDef::Custom => PropKind::Custom,
            PropDef::Vocab { multi: false, .. } => PropKind::SingleVocab,
            PropDef::Vocab { multi: true, .. } => PropKind::MultiVocab,
        }
    }

    pub fn is_vocab(&self) -> bool {
        matches!(self, PropDef::Vocab { .. })
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, PropDef::Vocab { multi: true, .. })
    }

    /// The vocabulary namespace for vocab properties.
    pub fn vocab_uri(&self) -> Option<&str> {
        match self {
            PropDef::Vocab { uri, .. } => Some(uri),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum SimpleKind {
    Value,
    Custom,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum VocabKind {
    Vocab,
    Multi,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPropDef {
    Simple(SimpleKind),
    Vocab {
        #[serde(rename = "type")]
        kind: VocabKind,
        uri: String,
        #[serde(default)]
        filter: Option<String>,
    },
}

impl From<RawPropDef> for PropDef {
    fn from(raw: RawPropDef) -> Self {
        match raw {
            RawPropDef::Simple(SimpleKind::Value) => PropDef::Value,
            RawPropDef::Simple(SimpleKind::Custom) => PropDef::Custom,
            RawPropDef::Vocab { kind, uri, filter } => PropDef::Vocab {
                uri,
                multi: matches!(kind, VocabKind::Multi),
                filter,
            },
        }
    }
}

/// Property definitions keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: HashMap<String, PropDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, def: PropDef) -> Self {
        self.fields.insert(name.into(), def);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropDef> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema_yaml() {
        let yaml = r#"
street: value
logo: custom
industry: { type: vocab, uri: "ind:" }
activities: { type: multi, uri: "aci:" }
regStatus: { type: vocab, uri: "rst:", filter: "rst:1" }
"#;
        let schema: Schema = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schema.len(), 5);
        assert_eq!(schema.get("street").unwrap().kind(), PropKind::PlainValue);
        assert_eq!(schema.get("logo").unwrap().kind(), PropKind::Custom);
        assert_eq!(schema.get("industry").unwrap().kind(), PropKind::SingleVocab);
        assert_eq!(schema.get("activities").unwrap().kind(), PropKind::MultiVocab);
        assert_eq!(
            schema.get("regStatus"),
            Some(&PropDef::Vocab {
                uri: "rst:".to_string(),
                multi: false,
                filter: Some("rst:1".to_string()),
            })
        );
        assert_eq!(schema.get("industry").unwrap().vocab_uri(), Some("ind:"));
        assert!(schema.get("missing").is_none());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(serde_yaml::from_str::<Schema>("street: blob\n").is_err());
        assert!(serde_yaml::from_str::<Schema>("x: { type: value, uri: \"a:\" }\n").is_err());
    }
}
