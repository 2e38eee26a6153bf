//! Readers for sphweb documents.

mod sphweb;

pub use sphweb::{parse_document, read_document_file};
