//! Popup rendering for a single record.
//!
//! [`PopupApi`] resolves values, vocabulary terms, labels and links for one
//! record against its [`DataServices`]; [`render_popup`] lays them out in the
//! fixed `sea-initiative-*` skeleton expected by the map's popup styling.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::address::AddressComposer;
use crate::config::PopupSettings;
use crate::error::{PopupError, PopupResult};
use crate::fallback::FallbackChain;
use crate::labels::PhraseBook;
use crate::link::{self, encode_uri, LinkOptions};
use crate::qname::expand_qname;
use crate::record::{PropValue, Record, Value};
use crate::schema::PropDef;
use crate::services::DataServices;
use crate::template::{self, escape_html, InsertOptions, Template};
use crate::vocab::{Vocab, VocabServices};

const WWW_TEMPLATE: &str = r#"<li><a href="%u" target="_blank">%s</a></li>"#;
const EMAIL_TEMPLATE: &str = r#"<li><a href="%u" target="_blank" >%s</a></li>"#;
const REPORT_TEMPLATE: &str =
    r#"<a href="%u" target="_blank">%s <i class="fa fa-external-link-alt"></i></a>"#;

/// Resolves the displayable parts of one record.
pub struct PopupApi<'a> {
    record: &'a Record,
    services: &'a dyn DataServices,
    vocabs: &'a dyn VocabServices,
    lang: &'a str,
    labels: &'a PhraseBook,
    settings: PopupSettings,
}

impl<'a> PopupApi<'a> {
    pub fn new(record: &'a Record, services: &'a dyn DataServices) -> Self {
        PopupApi {
            record,
            services,
            vocabs: services.vocabs(),
            lang: services.language(),
            labels: services.functional_labels(),
            settings: PopupSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: PopupSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Override the address properties, in display order.
    pub fn set_address_fields(&mut self, fields: Vec<String>) {
        self.settings.address_fields = fields;
    }

    pub fn language(&self) -> &str {
        self.lang
    }

    pub fn labels(&self) -> &PhraseBook {
        self.labels
    }

    /// The raw value of a property.
    pub fn value(&self, name: &str) -> Option<&'a Value> {
        self.record.get(name)
    }

    /// Title of the vocabulary `uri` itself, e.g. "Industry" for `ind:`.
    pub fn get_title(&self, uri: &str, default: Option<&str>) -> String {
        let title = self.vocabs.vocab(uri, self.lang).map(|v| v.title.as_str());
        let chain = FallbackChain::new().then_non_empty(title);
        if !chain.is_resolved() {
            debug!(uri, lang = self.lang, "vocabulary title not found");
        }
        chain.then(default).or(self.labels.not_available.as_str())
    }

    /// Labels of the vocabulary code(s) held by property `name`, in order.
    ///
    /// Fails with `InvalidPropertyKind` unless the schema declares `name` as a
    /// vocabulary property, and with `InvalidPropertyValue` if the value is
    /// neither a code nor a list of codes.
    pub fn get_terms(&self, name: &str) -> PopupResult<Vec<String>> {
        let def = self.services.property_schema(name);
        if !def.is_some_and(PropDef::is_vocab) {
            return Err(PopupError::InvalidPropertyKind {
                property: name.to_string(),
            });
        }

        let terms = match self.record.typed(name, def)? {
            PropValue::VocabMulti(codes) => codes
                .iter()
                .map(|code| self.vocabs.term(code, self.lang, None))
                .collect(),
            PropValue::VocabSingle(code) => vec![self.vocabs.term(code, self.lang, None)],
            PropValue::Absent => Vec::new(),
            PropValue::Scalar(value) => {
                return Err(PopupError::InvalidPropertyValue {
                    property: name.to_string(),
                    value: value.to_string(),
                })
            }
        };

        if terms.is_empty() {
            return Ok(vec![self.labels.not_available.clone()]);
        }
        Ok(terms)
    }

    /// The first term of [`get_terms`](Self::get_terms).
    pub fn get_term(&self, name: &str, default: Option<&str>) -> PopupResult<String> {
        let terms = self.get_terms(name)?;
        Ok(FallbackChain::new()
            .then(terms.first())
            .then(default)
            .or(self.labels.not_available.as_str()))
    }

    /// A property's value as a string (unescaped).
    pub fn get_val(&self, name: &str, default: Option<&str>) -> String {
        FallbackChain::new()
            .then(self.value(name).map(Value::to_string))
            .then(default)
            .or(self.labels.not_available.as_str())
    }

    pub fn get_vocab(&self, uri: &str) -> Option<&'a Vocab> {
        self.vocabs.vocab(uri, self.lang)
    }

    /// Label for `token`: a plain key is looked up in the phrase book, a
    /// `prefix:code` token is resolved as a vocabulary term.
    pub fn get_label(&self, token: &str, default: Option<&str>) -> String {
        if token.contains(':') {
            return self.vocabs.term(token, self.lang, default);
        }
        let chain = FallbackChain::new().then(self.labels.get(token));
        if !chain.is_resolved() {
            debug!(key = token, "label not found");
        }
        chain.then(default).or(self.labels.not_available.as_str())
    }

    pub fn qname_to_uri(
        &self,
        qname: &str,
        dict: &HashMap<String, String>,
        default: Option<&str>,
    ) -> String {
        expand_qname(qname, dict, default)
    }

    pub fn escape_html(&self, text: &str) -> String {
        escape_html(text)
    }

    /// [`template::insert`] for a property value.
    pub fn insert(&self, name: &str, template: &str, opts: &InsertOptions<'_>) -> String {
        template::insert(self.value(name), template, opts)
    }

    pub fn link(&self, name: &str, opts: &LinkOptions<'_>) -> String {
        link::link(self.value(name), opts)
    }

    pub fn mail_link(&self, name: &str) -> String {
        link::mail_link(self.value(name))
    }

    pub fn phone_link(&self, name: &str) -> String {
        link::phone_link(self.value(name))
    }

    pub fn facebook_link(&self, name: &str) -> String {
        link::facebook_link(self.value(name))
    }

    pub fn twitter_link(&self, name: &str) -> String {
        link::twitter_link(self.value(name))
    }

    pub fn address(&self) -> String {
        AddressComposer::new(&self.settings.address_fields, self.labels).compose(self.record)
    }

    /// "Report an error" link for the configured property, or nothing when no
    /// report link is configured or the record has no contact id.
    pub fn report_link(&self) -> String {
        let Some(report) = &self.settings.report_link else {
            return String::new();
        };
        let contact_id = self
            .record
            .text(&report.property)
            .map(|uri| uri.rsplit('/').next().unwrap_or(uri))
            .unwrap_or_default();
        if contact_id.is_empty() {
            return String::new();
        }

        let uri = format!("{}{}", report.base_uri, encode_uri(contact_id));
        let text = escape_html(&self.labels.report_an_error);
        Template::parse(REPORT_TEMPLATE).render(Some(&text), Some(&uri))
    }

    /// `<h4>` row of a vocabulary property, titled by the vocabulary the
    /// schema assigns to it.
    fn term_header(&self, class: &str, name: &str) -> PopupResult<String> {
        let term = self.get_term(name, None)?;
        let title = match self.services.property_schema(name).and_then(PropDef::vocab_uri) {
            Some(uri) => self.get_title(uri, None),
            None => self.labels.not_available.clone(),
        };
        Ok(format!(
            r#"<h4 class="sea-initiative-{}">{}: {}</h4>"#,
            class,
            escape_html(&title),
            escape_html(&term)
        ))
    }

    /// Lay the record out in the popup skeleton.
    pub fn render(&self) -> PopupResult<String> {
        let name = self.insert("name", "%s", &InsertOptions::default());
        let www = self.link(
            "www",
            &LinkOptions::template(WWW_TEMPLATE).with_base(link::BaseUri::Prefix("https://")),
        );
        let email = self.link(
            "email",
            &LinkOptions::template(EMAIL_TEMPLATE).with_base(link::BaseUri::Prefix("mailto:")),
        );

        let industry = self.term_header("ind", "industry")?;
        let sic_section = self.term_header("sics", "sicSection")?;
        let ownership = self.term_header("ot", "ownershipType")?;
        let legal_form = self.term_header("lf", "legalForm")?;
        let reg_no = format!(
            r#"<h4 class="sea-initiative-regno">{}: {}</h4>"#,
            escape_html(&self.get_label("ui:regNo", None)),
            escape_html(&self.get_val("regNo", None))
        );
        let reg_status = self.term_header("rst", "regStatus")?;
        let description = self.insert("description", "%s", &InsertOptions::default());

        let address_label = escape_html(&self.get_label("ui:address", None));
        let address = self.address();
        let report = self.report_link();

        Ok(format!(
            r#"<div class="sea-initiative-details">
  <h2 class="sea-initiative-name">{name}</h2>
  <ul class="sea-list-no-indent">
    {www}
    {email}
  </ul>
  {industry}
  {sic_section}
  {ownership}
  {legal_form}
  {reg_no}
  {reg_status}
  <p>{description}</p>
</div>
<div class="sea-initiative-contact">
  <h3>{address_label}</h3>
  {address}
  <p>{report}</p>
</div>
"#
        ))
    }
}

/// Render `record` with the default layout settings.
pub fn render_popup(record: &Record, services: &dyn DataServices) -> PopupResult<String> {
    render_popup_with(record, services, &PopupSettings::default())
}

/// Render `record` with explicit layout settings.
pub fn render_popup_with(
    record: &Record,
    services: &dyn DataServices,
    settings: &PopupSettings,
) -> PopupResult<String> {
    PopupApi::new(record, services)
        .with_settings(settings.clone())
        .render()
        .map_err(|e| {
            warn!(error = %e, "popup render failed");
            e
        })
}
