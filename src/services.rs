use crate::labels::PhraseBook;
use crate::schema::{PropDef, Schema};
use crate::vocab::{VocabIndex, VocabServices};

/// Everything a popup needs from the hosting application, pre-fetched.
pub trait DataServices {
    fn vocabs(&self) -> &dyn VocabServices;
    fn language(&self) -> &str;
    fn functional_labels(&self) -> &PhraseBook;
    fn property_schema(&self, name: &str) -> Option<&PropDef>;
}

/// [`DataServices`] over in-memory data, usually built from a `PopupConfig`.
#[derive(Debug, Clone, Default)]
pub struct StaticDataServices {
    pub language: String,
    pub labels: PhraseBook,
    pub schema: Schema,
    pub vocabs: VocabIndex,
}

impl StaticDataServices {
    pub fn new(language: &str, labels: PhraseBook, schema: Schema, vocabs: VocabIndex) -> Self {
        StaticDataServices {
            language: language.to_string(),
            labels,
            schema,
            vocabs,
        }
    }
}

impl DataServices for StaticDataServices {
    fn vocabs(&self) -> &dyn VocabServices {
        &self.vocabs
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn functional_labels(&self) -> &PhraseBook {
        &self.labels
    }

    fn property_schema(&self, name: &str) -> Option<&PropDef> {
        self.schema.get(name)
    }
}
