//! Splitting a parsed document into product records.

use onix_model::ReleaseVersion;

use crate::discovery::SourceDocument;
use crate::error::{IngestError, Result};
use crate::tree::{DocumentNode, Element, parse_document};

const PRODUCT_TAG: &str = "Product";
const RELEASE_ATTRIBUTE: &str = "release";
/// Release assumed for multi-product documents without a `release` attribute.
const MULTI_PRODUCT_DEFAULT_RELEASE: &str = "0";
/// Release assumed for single-product documents without a `release` attribute.
const SINGLE_PRODUCT_DEFAULT_RELEASE: &str = "2.1";

/// One product as found in a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProductRecord {
    /// Release declared by the enclosing document.
    pub release: ReleaseVersion,
    /// The `Product` element.
    pub product: Element,
    pub origin_file_path: String,
    pub origin_file_name: String,
}

/// Read and parse a document, then enumerate its products.
pub fn read_products(document: &SourceDocument) -> Result<Vec<RawProductRecord>> {
    let bytes = std::fs::read(&document.path).map_err(|e| IngestError::FileRead {
        path: document.path.clone(),
        source: e,
    })?;
    let xml = String::from_utf8_lossy(&bytes);
    let root = parse_document(&xml).map_err(|e| IngestError::XmlParse {
        path: document.path.clone(),
        message: e.to_string(),
    })?;
    enumerate_products(root, document)
}

/// Split a document root into one record per direct `Product` child.
///
/// A root without products is rejected so the caller can skip the document.
pub fn enumerate_products(
    root: Element,
    document: &SourceDocument,
) -> Result<Vec<RawProductRecord>> {
    let declared = root.attribute(RELEASE_ATTRIBUTE).map(str::to_string);
    let products: Vec<Element> = root
        .into_children()
        .into_iter()
        .filter(|child| child.tag() == PRODUCT_TAG)
        .collect();

    if products.is_empty() {
        return Err(IngestError::NoProducts {
            path: document.path.clone(),
        });
    }

    let fallback = if products.len() > 1 {
        MULTI_PRODUCT_DEFAULT_RELEASE
    } else {
        SINGLE_PRODUCT_DEFAULT_RELEASE
    };
    let release = ReleaseVersion::parse(declared.as_deref().unwrap_or(fallback));

    tracing::debug!(
        path = %document.path.display(),
        release = %release,
        product_count = products.len(),
        "enumerated products"
    );

    let origin_file_path = document.origin_path();
    Ok(products
        .into_iter()
        .map(|product| RawProductRecord {
            release: release.clone(),
            product,
            origin_file_path: origin_file_path.clone(),
            origin_file_name: document.file_name.clone(),
        })
        .collect())
}
