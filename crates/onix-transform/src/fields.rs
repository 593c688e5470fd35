//! Field readers shared by the 2.x and 3.x mappings.
//!
//! Every reader returns `None` for a missing element and for an element
//! whose trimmed text is empty.

use onix_ingest::DocumentNode;

use crate::context::ExtractionContext;
use crate::runtime::decode_runtime;

/// `ProductIDType` for ISBN-13.
const ISBN13_ID_TYPE: &str = "15";
/// `ExtentType` for running time.
const RUNTIME_EXTENT_TYPE: &str = "09";
/// Currency read for both price columns.
const PRICE_CURRENCY: &str = "USD";

pub(crate) const CONTRIBUTOR_SEPARATOR: &str = ", ";

/// Non-empty text at `path`.
pub fn text_at<N: DocumentNode>(node: &N, path: &str) -> Option<String> {
    node.find_text(path)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// First node under `path` whose `key` child has text `expected`.
fn first_with<'a, N: DocumentNode>(
    node: &'a N,
    path: &str,
    key: &str,
    expected: &str,
) -> Option<&'a N> {
    node.find_all(path)
        .into_iter()
        .find(|candidate| candidate.find_text(key) == Some(expected))
}

/// ISBN-13 from the first product identifier of type `15`.
pub fn isbn<N: DocumentNode>(product: &N) -> Option<String> {
    first_with(product, ".//ProductIdentifier", "ProductIDType", ISBN13_ID_TYPE)
        .and_then(|identifier| text_at(identifier, "IDValue"))
}

/// Person names of every contributor, in document order.
pub fn contributors<N: DocumentNode>(product: &N) -> String {
    product
        .find_all(".//Contributor")
        .into_iter()
        .filter_map(|contributor| text_at(contributor, ".//PersonName"))
        .collect::<Vec<_>>()
        .join(CONTRIBUTOR_SEPARATOR)
}

/// Amount of the first USD price.
pub fn usd_price<N: DocumentNode>(product: &N) -> Option<String> {
    first_with(product, ".//Price", "./CurrencyCode", PRICE_CURRENCY)
        .and_then(|price| text_at(price, "./PriceAmount"))
}

/// Running time from the first extent of type `09`.
pub fn runtime<N: DocumentNode>(product: &N) -> Option<String> {
    let extent = first_with(product, ".//Extent", "./ExtentType", RUNTIME_EXTENT_TYPE)?;
    decode_runtime(
        extent.find_text("./ExtentUnit"),
        extent.find_text("./ExtentValue"),
    )
}

/// Subject code of the first `Subject` flagged as main subject.
pub fn main_subject_code<N: DocumentNode>(product: &N) -> Option<String> {
    product
        .find_all(".//Subject")
        .into_iter()
        .find(|subject| subject.find("./MainSubject").is_some())
        .and_then(|subject| text_at(subject, "./SubjectCode"))
}

/// Code used for the category lookup, independent of the release.
pub fn lookup_code<N: DocumentNode>(product: &N) -> Option<String> {
    text_at(product, ".//BASICMainSubject").or_else(|| main_subject_code(product))
}

/// Free text fed to the phrase matcher.
///
/// The `SubjectHeadingText` element wins whenever present, even if empty;
/// otherwise all `Text` elements are joined with a space.
pub fn subject_text<N: DocumentNode>(product: &N) -> String {
    match product.find(".//SubjectHeadingText") {
        Some(heading) => heading.text().to_string(),
        None => product
            .find_all(".//Text")
            .into_iter()
            .map(DocumentNode::text)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Category columns derived from the lookup table and the phrase matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub custom: Option<String>,
}

pub fn categories<N: DocumentNode>(product: &N, context: &ExtractionContext) -> Categories {
    let category = context
        .classification
        .lookup(lookup_code(product).as_deref().unwrap_or_default());
    let matched = context.phrases.match_text(&subject_text(product));
    let custom = [category.custom_tag.as_str(), matched.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    Categories {
        primary: non_empty(category.primary),
        secondary: non_empty(category.secondary),
        custom: non_empty(custom),
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
