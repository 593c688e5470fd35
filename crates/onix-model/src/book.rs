//! The canonical output row.

use serde::{Deserialize, Serialize};

use crate::marker;

/// Header of the user-editable selection column.
pub const SELECTION_COLUMN: &str = "To Collect (x)";

/// Output table columns, in serialization order.
pub const OUTPUT_COLUMNS: [&str; 16] = [
    "isbn",
    "title",
    "subtitle",
    "contributors",
    "imprint",
    "pubDate",
    "onSaleDate",
    "usPrice",
    "caPrice",
    "runtime",
    "BISAC",
    "language",
    "primaryCategory",
    "secondaryCategories",
    "customCategory",
    SELECTION_COLUMN,
];

/// One normalized book, independent of the ONIX release it came from.
///
/// Field order matches [`OUTPUT_COLUMNS`]; the serde names are the column
/// headers of the output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBook {
    pub isbn: String,
    pub title: String,
    pub subtitle: Option<String>,
    /// Contributor names in document order, joined with `", "`.
    pub contributors: String,
    pub imprint: String,
    pub pub_date: String,
    pub on_sale_date: String,
    pub us_price: String,
    pub ca_price: Option<String>,
    /// Formatted duration for audio products.
    pub runtime: Option<String>,
    /// Raw BISAC-style subject code.
    #[serde(rename = "BISAC")]
    pub classification_code: String,
    pub language: String,
    pub primary_category: Option<String>,
    pub secondary_categories: Option<String>,
    pub custom_category: Option<String>,
    #[serde(rename = "To Collect (x)", with = "marker")]
    pub selected: bool,
}
