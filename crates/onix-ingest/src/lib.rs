//! Reading ONIX sources: publisher directories, XML documents, and the
//! product records inside them.

#![deny(unsafe_code)]

pub mod discovery;
pub mod error;
pub mod product;
pub mod tree;

pub use discovery::{SourceDocument, discover_documents};
pub use error::{IngestError, Result};
pub use product::{RawProductRecord, enumerate_products, read_products};
pub use tree::{DocumentNode, Element, XmlSyntaxError, parse_document};
