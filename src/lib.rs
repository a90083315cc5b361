//! # Map popup renderer
//!
//! Renders one point-of-interest record as a safe HTML fragment for a map
//! popup, using the record's property schema, localized vocabularies and a
//! phrase book of functional labels.
//!
//! ## Features
//! - `%s` / `%u` / `%%` micro-templates with HTML escaping by default
//! - Links from property values, with base-URI prefixing or qname expansion
//! - Vocabulary term and title lookup, single- and multi-valued
//! - Address block composition with a "no location" marker
//! - YAML configuration for schema, labels, vocabularies and layout
//!
//! ## Example
//! ```ignore
//! use mykomap_popup::{render_popup_with, PopupConfig, Record};
//!
//! let config = PopupConfig::from_path("popup.yaml")?;
//! let (services, settings) = config.into_services();
//! let record = Record::from_yaml_str("name: Acme Co-op\nindustry: ind:A\n")?;
//!
//! let html = render_popup_with(&record, &services, &settings)?;
//! ```

pub mod address;
pub mod config;
pub mod error;
pub mod fallback;
pub mod labels;
pub mod link;
pub mod popup;
pub mod qname;
pub mod record;
pub mod schema;
pub mod services;
pub mod template;
pub mod vocab;

// --- Core types ---
pub use config::{PopupConfig, PopupSettings, ReportLink};
pub use error::{PopupError, PopupResult};
pub use labels::PhraseBook;
pub use popup::PopupApi;
pub use record::{PropValue, Record, Value};
pub use schema::{PropDef, PropKind, Schema};
pub use services::{DataServices, StaticDataServices};
pub use vocab::{Vocab, VocabIndex, VocabServices};

// --- Building blocks ---
pub use link::{BaseUri, LinkOptions};
pub use qname::{parse_qname, QName};
pub use template::{escape_html, insert, InsertOptions, Template};

/// Render a record with the default layout settings
pub fn render_popup(record: &Record, services: &dyn DataServices) -> PopupResult<String> {
    popup::render_popup(record, services)
}

/// Render a record with explicit layout settings (address fields, report link)
pub fn render_popup_with(
    record: &Record,
    services: &dyn DataServices,
    settings: &PopupSettings,
) -> PopupResult<String> {
    popup::render_popup_with(record, services, settings)
}
