//! Lookup tables used to enrich normalized books with subject categories.
//!
//! Both tables are built once from CSV exports of the classification
//! workbook and are read-only afterwards, so they can be shared freely
//! (typically behind an `Arc`) between extraction calls.
//!
//! - [`ClassificationTable`]: classification code to primary/secondary
//!   category and custom tag.
//! - [`SubjectPhraseMatcher`]: ordered phrase rules matched against free
//!   text to produce custom tags.

#![deny(unsafe_code)]

mod classification;
mod csv_utils;
mod error;
mod phrases;

pub use classification::{ClassificationTable, load_classification_table, split_category_path};
pub use error::{Result, StandardsError};
pub use phrases::{SubjectPhraseMatcher, load_subject_phrases};
