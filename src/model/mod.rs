//! Document schema types.
//!
//! This module defines the stable schema shared by the section generators,
//! the registry and the composition driver: which kinds of documents exist,
//! which sections a document can be made of, and what a rendered document
//! looks like once its pages have been assembled.

mod document;
mod page;
mod section;

pub use document::{DocumentType, RenderedDocument};
pub use page::Page;
pub use section::SectionId;

/// The loosely-typed input of every render.
///
/// Owned by the caller; generators only ever borrow it.
pub type DataObject = serde_json::Value;
