//! Editor boundary: a document being edited.
//!
//! A new draft starts from the registry's default content. Each update
//! re-composes the whole document; a failed update records the error and
//! keeps showing the last good render.

use crate::error::Error;
use crate::model::{DocumentType, RenderedDocument};
use crate::registry::registry;
use crate::render::{compose_document, ComposeOptions};
use crate::store::StoredDocument;
use serde_json::Value;

/// A document under edit.
#[derive(Debug)]
pub struct Draft {
    document_type: DocumentType,
    options: ComposeOptions,
    data: Value,
    rendered: RenderedDocument,
    last_error: Option<Error>,
    revision: u64,
}

impl Draft {
    /// Start a draft from the default content of `document_type`.
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            options: ComposeOptions::default(),
            data: Value::Object(Default::default()),
            rendered: registry().default_content(document_type).clone(),
            last_error: None,
            revision: 0,
        }
    }

    /// Resume a draft from a stored record.
    pub fn from_stored(record: StoredDocument) -> Self {
        Self {
            document_type: record.document_type,
            options: ComposeOptions::default(),
            data: record.data,
            rendered: record.rendered,
            last_error: None,
            revision: 0,
        }
    }

    /// Compose future updates with `options`.
    pub fn with_options(mut self, options: ComposeOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the data object and re-compose.
    ///
    /// Returns `true` if the new render succeeded. On failure the previous
    /// render and data stay current and the error is available from
    /// [`Draft::last_error`].
    pub fn update(&mut self, data: Value) -> bool {
        match compose_document(self.document_type, &data, &self.options) {
            Ok(rendered) => {
                self.data = data;
                self.rendered = rendered;
                self.last_error = None;
                self.revision += 1;
                true
            }
            Err(e) => {
                log::warn!("Draft update for {} rejected: {}", self.document_type, e);
                self.last_error = Some(e);
                false
            }
        }
    }

    /// Type of the draft.
    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Data of the last successful render.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Last successful render.
    pub fn rendered(&self) -> &RenderedDocument {
        &self.rendered
    }

    /// Error of the most recent update, if it failed.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Number of successful updates.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Snapshot for persistence.
    pub fn to_stored(&self) -> StoredDocument {
        StoredDocument::new(self.data.clone(), self.rendered.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_draft_uses_default_content() {
        let draft = Draft::new(DocumentType::OfferLetter);
        assert_eq!(
            draft.rendered(),
            registry().default_content(DocumentType::OfferLetter)
        );
        assert_eq!(draft.revision(), 0);
    }

    #[test]
    fn test_failed_update_keeps_last_good_render() {
        let mut draft = Draft::new(DocumentType::Invoice);
        assert!(draft.update(json!({ "items": [{ "description": "Design", "hours": 2, "rate": 100 }] })));
        let good = draft.rendered().clone();

        assert!(!draft.update(json!({ "items": [{ "hours": 1, "rate": -5 }] })));
        assert_eq!(draft.rendered(), &good);
        assert_eq!(draft.last_error().and_then(Error::line_item_index), Some(0));
        assert_eq!(draft.revision(), 1);

        assert!(draft.update(json!({})));
        assert!(draft.last_error().is_none());
    }

    #[test]
    fn test_stored_round_trip() {
        let mut draft = Draft::new(DocumentType::Blog);
        draft.update(json!({ "title": "Notes" }));
        let resumed = Draft::from_stored(draft.to_stored());
        assert_eq!(resumed.rendered(), draft.rendered());
        assert_eq!(resumed.data(), &json!({ "title": "Notes" }));
    }
}
