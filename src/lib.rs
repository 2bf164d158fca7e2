//! # docsmith
//!
//! Document assembly engine for Rust.
//!
//! This library composes multi-page HTML documents (business proposals,
//! offer and termination letters, invoices, documentation pages and blog
//! posts) from a single JSON data object.
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//!
//! fn main() -> docsmith::Result<()> {
//!     let data = json!({ "projectName": "Atlas", "clientCompany": "Acme" });
//!     let doc = docsmith::compose("proposal", &data)?;
//!
//!     assert!(doc.contains("Atlas"));
//!     assert_eq!(doc.page_count(), 28);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Total defaulting**: every field has a fallback, so an empty data
//!   object still renders a complete document
//! - **Deterministic output**: equal data and options give byte-identical markup
//! - **Diagrams**: Mermaid descriptors for timelines, pricing and risk
//! - **Invoices**: exact decimal arithmetic with line item validation
//! - **Parallel processing**: Uses Rayon for sections and batch composition

pub mod diagram;
pub mod draft;
pub mod error;
pub mod interpolate;
pub mod invoice;
pub mod model;
pub mod registry;
pub mod render;
pub mod sections;
pub mod store;

// Re-export commonly used types
pub use diagram::Diagram;
pub use draft::Draft;
pub use error::{Error, Result};
pub use invoice::{compute_invoice, InvoiceSummary, LineItem};
pub use model::{DataObject, DocumentType, Page, RenderedDocument, SectionId};
pub use registry::{registry, Registry};
pub use render::{
    compose, compose_batch, compose_with_options, ComposeOptions, ComposeRequest, DateStyle,
    JsonFormat, Layout,
};
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StoredDocument};

use serde_json::Value;
use std::path::Path;

/// Read a JSON data object from a file and compose it.
///
/// # Example
///
/// ```no_run
/// use docsmith::compose_file;
///
/// let doc = compose_file("invoice", "invoice.json").unwrap();
/// std::fs::write("invoice.html", doc.as_str()).unwrap();
/// ```
pub fn compose_file<P: AsRef<Path>>(type_id: &str, path: P) -> Result<RenderedDocument> {
    let data = read_data(path)?;
    compose(type_id, &data)
}

/// Read a JSON data object from a file.
pub fn read_data<P: AsRef<Path>>(path: P) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Default content of a document type: the composition of an empty object.
///
/// # Example
///
/// ```
/// let doc = docsmith::default_content("offer-letter").unwrap();
/// assert!(doc.contains("[Candidate Name]"));
/// ```
pub fn default_content(type_id: &str) -> Result<&'static RenderedDocument> {
    registry().default_content_for(type_id)
}

/// Ordered sections of a document type.
pub fn sections(type_id: &str) -> Result<&'static [SectionId]> {
    registry().sections_for(type_id)
}

/// Compose a document and extract its plain text.
pub fn to_text(type_id: &str, data: &Value) -> Result<String> {
    let doc = compose(type_id, data)?;
    Ok(render::to_text(&doc))
}

/// Compose a document and serialize it to JSON.
pub fn to_json(type_id: &str, data: &Value, format: JsonFormat) -> Result<String> {
    let doc = compose(type_id, data)?;
    render::to_json(&doc, format)
}

/// Builder for composing documents.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use docsmith::Assembler;
/// use serde_json::json;
///
/// let text = Assembler::new()
///     .for_print()
///     .with_today(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap())
///     .with_currency_symbol("€")
///     .compose("invoice", &json!({ "items": [{ "hours": 2, "rate": 50 }] }))?
///     .to_text();
/// assert!(text.contains("€100.00"));
/// # Ok::<(), docsmith::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    options: ComposeOptions,
}

impl Assembler {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use print layout semantics.
    pub fn for_print(mut self) -> Self {
        self.options = self.options.for_print();
        self
    }

    /// Pin the render date.
    pub fn with_today(mut self, today: chrono::NaiveDate) -> Self {
        self.options = self.options.with_today(today);
        self
    }

    /// Set the currency symbol.
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.options = self.options.with_currency_symbol(symbol);
        self
    }

    /// Set the date style.
    pub fn with_date_style(mut self, style: DateStyle) -> Self {
        self.options = self.options.with_date_style(style);
        self
    }

    /// Omit the stylesheet block.
    pub fn without_stylesheet(mut self) -> Self {
        self.options = self.options.with_stylesheet(false);
        self
    }

    /// Disable parallel section generation.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Log unresolved interpolation markers found in the output.
    pub fn with_lint(mut self) -> Self {
        self.options = self.options.with_lint(true);
        self
    }

    /// Options this builder composes with.
    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Compose a document by type id.
    pub fn compose(&self, type_id: &str, data: &Value) -> Result<Assembled> {
        let document = compose_with_options(type_id, data, &self.options)?;
        Ok(Assembled { document })
    }

    /// Compose a document from a JSON file.
    pub fn compose_file<P: AsRef<Path>>(&self, type_id: &str, path: P) -> Result<Assembled> {
        let data = read_data(path)?;
        self.compose(type_id, &data)
    }

    /// Compose many documents in parallel.
    pub fn compose_batch(&self, requests: &[ComposeRequest]) -> Vec<Result<RenderedDocument>> {
        compose_batch(requests, &self.options)
    }
}

/// Result of composing a document.
#[derive(Debug, Clone)]
pub struct Assembled {
    /// The composed document
    pub document: RenderedDocument,
}

impl Assembled {
    /// Full markup.
    pub fn markup(&self) -> &str {
        self.document.as_str()
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Unresolved interpolation markers in the output.
    pub fn unresolved_markers(&self) -> Vec<String> {
        render::lint::unresolved_markers(self.document.as_str())
    }

    /// Get the document.
    pub fn document(&self) -> &RenderedDocument {
        &self.document
    }
}
