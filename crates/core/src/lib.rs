// Content catalog for the Strands Agents documentation server

pub mod catalog;
pub mod document;
pub mod error;
pub mod naming;

pub use catalog::{scan, Catalog, ContentItem, MARKDOWN_EXTENSION};
pub use document::read_document;
pub use error::{ContentError, ContentResult};
