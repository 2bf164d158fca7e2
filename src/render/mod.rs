//! Rendering module: composition of section pages into a document, plus
//! JSON and plain-text views of a composed document.

mod compose;
mod json;
pub mod lint;
pub mod markup;
mod options;
mod stylesheet;
mod text;

pub use compose::{
    compose, compose_batch, compose_document, compose_with_options, ComposeRequest, Composer,
};
pub use json::{page_listing, to_json, JsonFormat};
pub use options::{ComposeOptions, DateStyle, Layout};
pub use stylesheet::stylesheet;
pub use text::{to_text, visible_text};
